//! Tinyverse Game - Player-facing per-frame behavior
//!
//! Provides the camera rig, the player locomotion controller, and input handling.

pub mod camera;
pub mod error;
pub mod input;
pub mod player;

pub use camera::{CameraConfig, CameraRig, CameraView, CursorState};
pub use error::CameraError;
pub use input::{InputAction, InputBindings, InputHandler, InputState, MoveAxes};
pub use player::{AnimationConfig, Animator, BlendTargets, MovementConfig, PlayerController};
