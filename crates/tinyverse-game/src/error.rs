//! Error types for game setup

/// Errors raised while wiring the camera rig to the scene
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("Camera rig has no player transform to follow")]
    MissingPlayer,

    #[error("Camera rig has no camera transform to drive")]
    MissingCamera,
}
