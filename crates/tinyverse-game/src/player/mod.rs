//! Player controller module
//!
//! Provides smoothed locomotion, gravity and jumping, and animation blend parameters.

mod animation;
mod controller;
mod movement;

pub use animation::{AnimationConfig, Animator, BlendTargets, MAX_BLEND_LERP_SPEED};
pub use controller::PlayerController;
pub use movement::{MovementConfig, MAX_MOVEMENT_SMOOTH_TIME};
