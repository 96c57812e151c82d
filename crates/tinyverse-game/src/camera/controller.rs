//! Camera rig with smoothed mouse look and view switching

use glam::Vec2;
use tinyverse_core::{lerp_factor, smooth_damp_angle, Transform};
use tracing::{debug, error, info};

use crate::error::CameraError;
use crate::input::{InputAction, InputState};

use super::view::{body_rotation, CameraPose};
use super::{CameraConfig, CameraView, CursorState};

/// Camera rig following the player
///
/// Owns the look angles; the player body only ever receives the smoothed yaw.
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
    /// Active view
    view: CameraView,
    /// Raw yaw in degrees, `[0, 360)`
    yaw: f32,
    /// Raw pitch in degrees, within the configured limits
    pitch: f32,
    /// Smoothed yaw in degrees, `[0, 360)`
    yaw_smooth: f32,
    /// Smoothed pitch in degrees
    pitch_smooth: f32,
    /// Spring state for the yaw smoothing
    yaw_velocity: f32,
    /// Spring state for the pitch smoothing
    pitch_velocity: f32,
    /// Cursor behavior the window should apply
    cursor: CursorState,
    /// False until a successful [`start`](Self::start)
    enabled: bool,
}

impl CameraRig {
    /// Create a camera rig with the default config
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera rig with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            view: CameraView::ThirdPerson,
            yaw: 0.0,
            pitch: 0.0,
            yaw_smooth: 0.0,
            pitch_smooth: 0.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            cursor: CursorState::FREE,
            enabled: false,
        }
    }

    /// Attach the rig to a player and a camera
    ///
    /// Takes the initial yaw from the player, levels the pitch, locks the cursor if
    /// configured, and snaps the camera into the third-person view. If either
    /// transform is missing the rig stays disabled and `update` does nothing.
    pub fn start(
        &mut self,
        player: Option<&Transform>,
        camera: Option<&mut Transform>,
    ) -> Result<(), CameraError> {
        let (player, camera) = match (player, camera) {
            (Some(player), Some(camera)) => (player, camera),
            (None, _) => return Err(self.disable(CameraError::MissingPlayer)),
            (_, None) => return Err(self.disable(CameraError::MissingCamera)),
        };

        self.yaw = player.yaw_degrees();
        self.yaw_smooth = self.yaw;
        self.pitch = 0.0;
        self.pitch_smooth = 0.0;
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;

        if self.config.lock_cursor {
            self.cursor = CursorState::LOCKED;
        }

        self.enabled = true;
        self.set_view(CameraView::ThirdPerson, true, player, camera);
        info!(yaw = self.yaw, "Camera rig started");
        Ok(())
    }

    fn disable(&mut self, err: CameraError) -> CameraError {
        error!("{err}, disabling camera rig");
        self.enabled = false;
        err
    }

    /// Update the rig (call each frame)
    pub fn update(
        &mut self,
        input: &InputState,
        player: &mut Transform,
        camera: &mut Transform,
        dt: f32,
    ) {
        if !self.enabled {
            return;
        }

        self.handle_view_switch(input, player, camera);

        if self.view.uses_mouse_look() {
            self.handle_mouse_look(input.mouse_delta, player, dt);
        }

        self.follow_player(player, camera, dt);
        self.handle_cursor_toggle(input);
    }

    fn handle_view_switch(&mut self, input: &InputState, player: &Transform, camera: &mut Transform) {
        let requested = if input.is_just_pressed(InputAction::FirstPersonView) {
            Some(CameraView::FirstPerson)
        } else if input.is_just_pressed(InputAction::ThirdPersonView) {
            Some(CameraView::ThirdPerson)
        } else if input.is_just_pressed(InputAction::TopDownView) {
            Some(CameraView::TopDown)
        } else {
            None
        };

        if let Some(view) = requested {
            self.set_view(view, false, player, camera);
        }
    }

    /// Apply look input and turn the player body to the smoothed yaw
    pub fn handle_mouse_look(&mut self, mouse_delta: Vec2, player: &mut Transform, dt: f32) {
        self.yaw = (self.yaw + mouse_delta.x * self.config.sensitivity_x * dt).rem_euclid(360.0);

        // Mouse y grows downward
        self.pitch = (self.pitch - mouse_delta.y * self.config.sensitivity_y * dt)
            .clamp(self.config.pitch_min, self.config.pitch_max);

        self.yaw_smooth = smooth_damp_angle(
            self.yaw_smooth,
            self.yaw,
            &mut self.yaw_velocity,
            self.config.rotation_smooth_time,
            dt,
        )
        .rem_euclid(360.0);
        self.pitch_smooth = smooth_damp_angle(
            self.pitch_smooth,
            self.pitch,
            &mut self.pitch_velocity,
            self.config.rotation_smooth_time,
            dt,
        );

        player.rotation = body_rotation(self.yaw_smooth);
    }

    fn follow_player(&self, player: &Transform, camera: &mut Transform, dt: f32) {
        let t = lerp_factor(self.view.follow_rate(&self.config), dt);
        self.target_pose(player).follow(camera, t);
    }

    fn handle_cursor_toggle(&mut self, input: &InputState) {
        if !self.config.lock_cursor {
            return;
        }

        if input.is_just_pressed(InputAction::ReleaseCursor) {
            self.cursor = CursorState::FREE;
            debug!("Cursor released");
        } else if input.is_just_pressed(InputAction::CaptureCursor) {
            self.cursor = CursorState::LOCKED;
            debug!("Cursor captured");
        }
    }

    /// Switch views; `instant` snaps the camera onto the new view's pose
    pub fn set_view(
        &mut self,
        view: CameraView,
        instant: bool,
        player: &Transform,
        camera: &mut Transform,
    ) {
        if self.view != view {
            info!(?view, "Switching camera view");
        }
        self.view = view;

        if instant {
            self.target_pose(player).snap(camera);
        }
    }

    /// Target pose for the active view with the current smoothed angles
    pub fn target_pose(&self, player: &Transform) -> CameraPose {
        self.view
            .target_pose(&self.config, player, self.yaw_smooth, self.pitch_smooth)
    }

    /// Active view
    pub fn view(&self) -> CameraView {
        self.view
    }

    /// Raw yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Raw pitch in degrees (positive looks up)
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Smoothed yaw in degrees
    pub fn smoothed_yaw(&self) -> f32 {
        self.yaw_smooth
    }

    /// Smoothed pitch in degrees
    pub fn smoothed_pitch(&self) -> f32 {
        self.pitch_smooth
    }

    /// Cursor behavior the window should apply
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Whether mouse motion should reach the rig
    ///
    /// With cursor locking turned off the mouse always steers; otherwise only
    /// while the cursor is locked.
    pub fn accepts_mouse_look(&self) -> bool {
        !self.config.lock_cursor || self.cursor.locked
    }

    /// Whether the rig was started successfully
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;
    use crate::camera::view::look_rotation;
    use crate::input::InputHandler;

    const DT: f32 = 1.0 / 60.0;

    fn pressed(actions: &[InputAction]) -> InputState {
        let mut input = InputState::new();
        for action in actions {
            input.just_pressed.insert(*action);
            input.held.insert(*action);
        }
        input
    }

    fn started_rig() -> (CameraRig, Transform, Transform) {
        let mut rig = CameraRig::new();
        let player = Transform::default();
        let mut camera = Transform::default();
        rig.start(Some(&player), Some(&mut camera)).unwrap();
        (rig, player, camera)
    }

    #[test]
    fn test_start_without_player_disables_rig() {
        let mut rig = CameraRig::new();
        let mut camera = Transform::default();
        assert_eq!(
            rig.start(None, Some(&mut camera)),
            Err(CameraError::MissingPlayer)
        );
        assert!(!rig.is_enabled());

        let mut player = Transform::default();
        rig.update(&pressed(&[InputAction::TopDownView]), &mut player, &mut camera, DT);
        assert_eq!(camera, Transform::default());
        assert_eq!(rig.view(), CameraView::ThirdPerson);
    }

    #[test]
    fn test_start_without_camera_disables_rig() {
        let mut rig = CameraRig::new();
        let player = Transform::default();
        assert_eq!(rig.start(Some(&player), None), Err(CameraError::MissingCamera));
        assert!(!rig.is_enabled());
    }

    #[test]
    fn test_start_snaps_to_third_person() {
        let mut rig = CameraRig::new();
        let player = Transform::from_position_rotation(
            Vec3::new(2.0, 0.0, 0.0),
            Quat::from_rotation_y(-90f32.to_radians()),
        );
        let mut camera = Transform::default();
        rig.start(Some(&player), Some(&mut camera)).unwrap();

        assert!(rig.is_enabled());
        assert_eq!(rig.view(), CameraView::ThirdPerson);
        assert!((rig.yaw() - 90.0).abs() < 1e-3);
        assert_eq!(rig.pitch(), 0.0);
        assert!(camera.position.distance(Vec3::new(-3.0, 3.0, 0.0)) < 1e-3);
        assert_eq!(rig.cursor(), CursorState::LOCKED);

        let to_head = (Vec3::new(2.0, 0.8, 0.0) - camera.position).normalize();
        assert!(camera.forward().distance(to_head) < 1e-4);
    }

    #[test]
    fn test_view_switch_is_smoothed() {
        let (mut rig, mut player, mut camera) = started_rig();
        let before = camera.position;

        rig.update(&pressed(&[InputAction::TopDownView]), &mut player, &mut camera, DT);
        assert_eq!(rig.view(), CameraView::TopDown);

        let expected = before.lerp(Vec3::new(0.0, 10.0, 0.0), 10.0 * DT);
        assert!(camera.position.distance(expected) < 1e-4);
        assert!(camera.forward().distance(-Vec3::Y) < 1e-4);
    }

    #[test]
    fn test_first_person_key_wins() {
        let (mut rig, mut player, mut camera) = started_rig();
        let input = pressed(&[InputAction::TopDownView, InputAction::FirstPersonView]);
        rig.update(&input, &mut player, &mut camera, DT);
        assert_eq!(rig.view(), CameraView::FirstPerson);
    }

    #[test]
    fn test_instant_view_switch_snaps() {
        let (mut rig, player, mut camera) = started_rig();
        rig.set_view(CameraView::FirstPerson, true, &player, &mut camera);
        assert!(camera.position.distance(Vec3::new(0.0, 0.8, 0.0)) < 1e-4);
        assert!(camera.forward().distance(-Vec3::Z) < 1e-4);
    }

    #[test]
    fn test_mouse_look_turns_player() {
        let (mut rig, mut player, mut camera) = started_rig();

        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(1.0, 0.0);
        rig.update(&input, &mut player, &mut camera, DT);

        let target = 200.0 * DT;
        assert!((rig.yaw() - target).abs() < 1e-4);

        input.mouse_delta = Vec2::ZERO;
        for _ in 0..60 {
            rig.update(&input, &mut player, &mut camera, DT);
        }
        assert!((rig.smoothed_yaw() - target).abs() < 0.01);
        assert!((player.yaw_degrees() - target).abs() < 0.01);
    }

    #[test]
    fn test_yaw_wraps_through_zero() {
        let (mut rig, mut player, mut camera) = started_rig();

        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(-1.0, 0.0);
        rig.update(&input, &mut player, &mut camera, DT);

        assert!((rig.yaw() - (360.0 - 200.0 * DT)).abs() < 1e-3);
        assert!(rig.smoothed_yaw() > 180.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let (mut rig, mut player, mut camera) = started_rig();

        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(0.0, 1000.0);
        rig.update(&input, &mut player, &mut camera, DT);
        assert_eq!(rig.pitch(), rig.config.pitch_min);

        input.mouse_delta = Vec2::new(0.0, -1000.0);
        rig.update(&input, &mut player, &mut camera, DT);
        assert_eq!(rig.pitch(), rig.config.pitch_max);
    }

    #[test]
    fn test_top_down_ignores_mouse() {
        let (mut rig, mut player, mut camera) = started_rig();
        rig.update(&pressed(&[InputAction::TopDownView]), &mut player, &mut camera, DT);

        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(5.0, 5.0);
        rig.update(&input, &mut player, &mut camera, DT);

        assert_eq!(rig.yaw(), 0.0);
        assert_eq!(rig.pitch(), 0.0);
        assert_eq!(player.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_cursor_toggle() {
        let (mut rig, mut player, mut camera) = started_rig();

        rig.update(&pressed(&[InputAction::ReleaseCursor]), &mut player, &mut camera, DT);
        assert_eq!(rig.cursor(), CursorState::FREE);

        rig.update(&pressed(&[InputAction::CaptureCursor]), &mut player, &mut camera, DT);
        assert_eq!(rig.cursor(), CursorState::LOCKED);
    }

    #[test]
    fn test_cursor_untouched_without_lock() {
        let mut rig = CameraRig::with_config(CameraConfig {
            lock_cursor: false,
            ..Default::default()
        });
        let mut player = Transform::default();
        let mut camera = Transform::default();
        rig.start(Some(&player), Some(&mut camera)).unwrap();
        assert_eq!(rig.cursor(), CursorState::FREE);

        rig.update(&pressed(&[InputAction::CaptureCursor]), &mut player, &mut camera, DT);
        assert_eq!(rig.cursor(), CursorState::FREE);
    }

    #[test]
    fn test_mouse_look_without_cursor_lock() {
        let mut rig = CameraRig::with_config(CameraConfig {
            lock_cursor: false,
            ..Default::default()
        });
        let mut player = Transform::default();
        let mut camera = Transform::default();
        rig.start(Some(&player), Some(&mut camera)).unwrap();
        assert!(rig.accepts_mouse_look());

        let mut handler = InputHandler::new();
        handler.set_look_enabled(rig.accepts_mouse_look());
        handler.handle_mouse_motion((100.0, 0.0));
        rig.update(&handler.state, &mut player, &mut camera, DT);

        // 100px * 0.1 sensitivity * 200 deg/s
        assert!((rig.yaw() - 2000.0 * DT).abs() < 1e-3);
    }

    #[test]
    fn test_released_cursor_stops_mouse_look() {
        let (mut rig, mut player, mut camera) = started_rig();
        assert!(rig.accepts_mouse_look());

        rig.update(&pressed(&[InputAction::ReleaseCursor]), &mut player, &mut camera, DT);
        assert!(!rig.accepts_mouse_look());
    }

    #[test]
    fn test_first_person_follows_faster() {
        let (mut rig, mut player, mut camera) = started_rig();
        let before = camera.position;

        rig.update(&pressed(&[InputAction::FirstPersonView]), &mut player, &mut camera, DT);

        let expected = before.lerp(Vec3::new(0.0, 0.8, 0.0), 20.0 * DT);
        assert!(camera.position.distance(expected) < 1e-4);
    }

    #[test]
    fn test_third_person_orbits_with_smoothed_yaw() {
        let (mut rig, mut player, mut camera) = started_rig();

        // Turn 90 degrees in one frame, then let the smoothing settle
        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(27.0, 0.0);
        rig.update(&input, &mut player, &mut camera, DT);
        input.mouse_delta = Vec2::ZERO;
        for _ in 0..300 {
            rig.update(&input, &mut player, &mut camera, DT);
        }

        let yaw = rig.smoothed_yaw();
        assert!((yaw - 90.0).abs() < 0.01);

        // Turned right by 90, so behind the player is -X
        assert!(camera.position.distance(Vec3::new(-5.0, 3.0, 0.0)) < 0.01);
        let to_head = (Vec3::new(0.0, 0.8, 0.0) - camera.position).normalize();
        assert!(camera.forward().distance(to_head) < 1e-3);
    }

    #[test]
    fn test_first_person_uses_smoothed_pitch() {
        let (mut rig, mut player, mut camera) = started_rig();
        rig.update(&pressed(&[InputAction::FirstPersonView]), &mut player, &mut camera, DT);

        // Mouse up looks up
        let mut input = InputState::new();
        input.mouse_delta = Vec2::new(0.0, -6.0);
        rig.update(&input, &mut player, &mut camera, DT);

        let raw = 1200.0 * DT;
        assert!((rig.pitch() - raw).abs() < 1e-3);
        assert!(rig.smoothed_pitch() > 0.0);
        assert!(rig.smoothed_pitch() < raw);

        let expected = look_rotation(rig.smoothed_yaw(), rig.smoothed_pitch());
        assert!(camera.rotation.angle_between(expected) < 1e-4);
        assert!(camera.forward().y > 0.0);
    }
}
