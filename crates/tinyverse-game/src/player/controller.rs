//! Player controller with smoothed WASD movement, gravity, and jumping

use glam::Vec3;
use tinyverse_core::{smooth_damp_vec3, Transform};
use tinyverse_physics::{CharacterController, PhysicsWorld};
use tracing::{debug, info};

use crate::input::{InputAction, InputState};

use super::animation::{AnimationConfig, Animator, BlendTargets};
use super::MovementConfig;

/// Player controller handling input, movement, and animation parameters
pub struct PlayerController {
    /// Movement configuration
    pub config: MovementConfig,
    /// Animation parameter configuration
    pub animation: AnimationConfig,
    /// Physics character controller
    pub character: CharacterController,
    /// Body transform; rotation is driven by the camera rig, position by the character
    body: Transform,
    /// Smoothed horizontal velocity (Y is always 0)
    horizontal_velocity: Vec3,
    /// Spring state for the horizontal smoothing
    horizontal_velocity_ref: Vec3,
    /// Vertical velocity (jumping/falling)
    vertical_velocity: f32,
    /// Current blend values fed to the animator
    blend: BlendTargets,
    /// Animation parameter sink, if the character has one
    animator: Option<Animator>,
}

impl PlayerController {
    /// Create a new player controller
    pub fn new() -> Self {
        Self::with_config(MovementConfig::default(), AnimationConfig::default())
    }

    /// Create a player controller with custom config
    pub fn with_config(config: MovementConfig, animation: AnimationConfig) -> Self {
        Self {
            config,
            animation,
            character: CharacterController::new(),
            body: Transform::default(),
            horizontal_velocity: Vec3::ZERO,
            horizontal_velocity_ref: Vec3::ZERO,
            vertical_velocity: 0.0,
            blend: BlendTargets::default(),
            animator: None,
        }
    }

    /// Spawn the player in the world at a position
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.spawn(physics, position);
        self.body.position = position;
        self.reset_motion();
        info!(?position, "Player spawned");
    }

    /// Teleport the player to a position
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.set_position(physics, position);
        self.body.position = position;
        self.reset_motion();
    }

    fn reset_motion(&mut self) {
        self.horizontal_velocity = Vec3::ZERO;
        self.horizontal_velocity_ref = Vec3::ZERO;
        self.vertical_velocity = 0.0;
    }

    /// Attach an animator to receive the blend parameters
    pub fn attach_animator(&mut self, animator: Animator) {
        self.animator = Some(animator);
    }

    /// The attached animator, if any
    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    /// Get the player's current foot position
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Body transform
    pub fn body(&self) -> &Transform {
        &self.body
    }

    /// Mutable body transform, for the camera rig to turn the player
    ///
    /// Position changes are overwritten by the next [`update`](Self::update).
    pub fn body_mut(&mut self) -> &mut Transform {
        &mut self.body
    }

    /// Check if the player is grounded
    pub fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    /// Smoothed horizontal velocity
    pub fn horizontal_velocity(&self) -> Vec3 {
        self.horizontal_velocity
    }

    /// Vertical velocity
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Current blend values
    pub fn blend_values(&self) -> BlendTargets {
        self.blend
    }

    /// Update the player (call each frame)
    pub fn update(&mut self, physics: &mut PhysicsWorld, input: &InputState, dt: f32) {
        self.handle_movement(physics, input, dt);
        self.update_animator(input, dt);
    }

    fn handle_movement(&mut self, physics: &mut PhysicsWorld, input: &InputState, dt: f32) {
        let axes = input.move_axes();
        let sprinting = input.is_held(InputAction::Sprint);

        // Local forward is -Z
        let local_dir = Vec3::new(axes.x, 0.0, -axes.z).normalize_or_zero();
        let target_speed = self.config.target_speed(axes, sprinting);
        let desired = self.body.transform_direction(local_dir) * target_speed;

        self.horizontal_velocity = smooth_damp_vec3(
            self.horizontal_velocity,
            desired,
            &mut self.horizontal_velocity_ref,
            self.config.movement_smooth_time,
            dt,
        );

        if self.character.is_grounded() {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = self.config.ground_stick_velocity;
            }

            if input.is_just_pressed(InputAction::Jump) {
                self.vertical_velocity = self.config.jump_force;
                debug!("Jump");
            }
        } else {
            self.vertical_velocity -= self.config.gravity * dt;
        }

        self.character.velocity = self.horizontal_velocity + Vec3::Y * self.vertical_velocity;
        self.character.update(physics, dt);
        self.body.position = self.character.position;
    }

    fn update_animator(&mut self, input: &InputState, dt: f32) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };

        let target = BlendTargets::from_input(input.move_axes(), input.is_held(InputAction::Sprint));
        self.blend = self.blend.step_towards(target, self.animation.lerp_speed * dt);

        animator.set_float(&self.animation.horizontal_param, self.blend.horizontal);
        animator.set_float(&self.animation.vertical_param, self.blend.vertical);
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}
