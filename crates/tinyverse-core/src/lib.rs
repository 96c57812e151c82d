//! Tinyverse Core - Core types and utilities
//!
//! This crate provides the foundational pieces shared by the camera rig and
//! the locomotion controller:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for positioning the player body and the camera
//! - Critically damped smoothing and step helpers
//! - Frame time tracking

pub mod math;
pub mod time;
pub mod types;

pub use glam::{EulerRot, Mat3, Quat, Vec2, Vec3};
pub use math::{delta_angle, lerp_factor, move_towards, smooth_damp, smooth_damp_angle, smooth_damp_vec3};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
