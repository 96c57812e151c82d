//! Camera system module
//!
//! Provides first-person, third-person, and top-down views with smoothed mouse look.

mod config;
mod controller;
mod cursor;
mod view;

pub use config::{CameraConfig, MAX_ROTATION_SMOOTH_TIME};
pub use controller::CameraRig;
pub use cursor::CursorState;
pub use view::{body_rotation, look_rotation, top_down_rotation, CameraPose, CameraView, Orientation};
