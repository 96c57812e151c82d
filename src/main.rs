//! Tinyverse - a playable character with a switchable camera
//!
//! This is the main entry point: it opens the window, routes input, and runs the
//! camera rig and the player controller every frame.

mod settings;

use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use tinyverse_core::{GameTime, Transform};
use tinyverse_game::{Animator, CameraRig, CursorState, InputHandler, PlayerController};
use tinyverse_physics::PhysicsWorld;

use settings::GameSettings;

/// Half extents of the floor slab
const GROUND_HALF_EXTENTS: Vec3 = Vec3::new(50.0, 0.5, 50.0);
/// Where the player appears
const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Frames between state dumps at debug level
const STATE_LOG_INTERVAL: u64 = 300;

/// Application state
struct TinyverseApp {
    settings: GameSettings,
    window: Option<Window>,
    input: InputHandler,
    physics: PhysicsWorld,
    player: PlayerController,
    camera_rig: CameraRig,
    camera: Transform,
    game_time: GameTime,
    last_frame: Instant,
    /// Cursor state last pushed to the window
    applied_cursor: Option<CursorState>,
}

impl TinyverseApp {
    fn new(settings: GameSettings) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.create_static_box(GROUND_HALF_EXTENTS, Vec3::new(0.0, -GROUND_HALF_EXTENTS.y, 0.0));

        let mut player =
            PlayerController::with_config(settings.movement.clone(), settings.animation.clone());
        player.attach_animator(Animator::new());
        player.spawn(&mut physics, SPAWN_POSITION);
        physics.update_queries();

        let mut input = InputHandler::new();
        input.mouse_sensitivity = settings.controls.mouse_sensitivity;
        input.invert_y = settings.controls.invert_y;

        let mut camera = Transform::default();
        let mut camera_rig = CameraRig::with_config(settings.camera.clone());
        if let Err(err) = camera_rig.start(Some(player.body()), Some(&mut camera)) {
            warn!("Running without camera control: {err}");
        }

        Self {
            settings,
            window: None,
            input,
            physics,
            player,
            camera_rig,
            camera,
            game_time: GameTime::default(),
            last_frame: Instant::now(),
            applied_cursor: None,
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.game_time.update(raw_delta);
        let dt = self.game_time.delta_time;

        self.physics.update_queries();
        self.camera_rig
            .update(&self.input.state, self.player.body_mut(), &mut self.camera, dt);
        self.player.update(&mut self.physics, &self.input.state, dt);

        self.apply_cursor();
        self.input.end_frame();

        if self.game_time.frame_count % STATE_LOG_INTERVAL == 0 {
            debug!(
                position = ?self.player.position(),
                grounded = self.player.is_grounded(),
                view = ?self.camera_rig.view(),
                camera = ?self.camera.position,
                "Frame {}",
                self.game_time.frame_count
            );
        }
    }

    /// Push the rig's cursor request to the window when it changes
    fn apply_cursor(&mut self) {
        self.input.set_look_enabled(self.camera_rig.accepts_mouse_look());

        let cursor = self.camera_rig.cursor();
        if self.applied_cursor == Some(cursor) {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let grab = if cursor.locked {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(err) = grab {
            warn!("Failed to change cursor grab: {err}");
        }

        window.set_cursor_visible(cursor.visible);
        self.applied_cursor = Some(cursor);
    }
}

impl ApplicationHandler for TinyverseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Tinyverse")
            .with_inner_size(LogicalSize::new(
                self.settings.video.width,
                self.settings.video.height,
            ));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!("Window created");
                self.window = Some(window);
                self.applied_cursor = None;
                self.last_frame = Instant::now();
            }
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window close requested");
                if let Err(err) = self.settings.save() {
                    warn!("Failed to save settings: {err:#}");
                }
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.handle_keyboard(event.physical_key, event.state);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_button(button, state);
            }
            WindowEvent::Focused(false) => {
                self.input.reset();
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.handle_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting Tinyverse...");

    let settings = GameSettings::load();

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TinyverseApp::new(settings);
    event_loop
        .run_app(&mut app)
        .context("Event loop exited with an error")?;

    info!("Tinyverse stopped");
    Ok(())
}
