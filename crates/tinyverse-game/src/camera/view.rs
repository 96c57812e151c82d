//! Camera views and the placement math behind them

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tinyverse_core::Transform;

use super::CameraConfig;

/// Which viewpoint the camera rig is using
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraView {
    /// Camera at the player's eyes, looking along yaw/pitch
    FirstPerson,
    /// Camera behind and above the player, looking at its head
    #[default]
    ThirdPerson,
    /// Camera high above the player, looking straight down
    TopDown,
}

impl CameraView {
    /// Whether mouse movement steers yaw/pitch in this view
    pub fn uses_mouse_look(&self) -> bool {
        matches!(self, CameraView::FirstPerson | CameraView::ThirdPerson)
    }

    /// Follow rate used to interpolate the camera toward its target position
    pub fn follow_rate(&self, config: &CameraConfig) -> f32 {
        match self {
            CameraView::FirstPerson => config.first_person_follow_rate,
            CameraView::ThirdPerson | CameraView::TopDown => config.follow_rate,
        }
    }

    /// Where the camera should be and how it should face for this view
    ///
    /// `yaw` and `pitch` are the smoothed look angles in degrees.
    pub fn target_pose(
        &self,
        config: &CameraConfig,
        player: &Transform,
        yaw: f32,
        pitch: f32,
    ) -> CameraPose {
        match self {
            CameraView::FirstPerson => CameraPose {
                position: player.position + player.transform_vector(config.first_person_offset),
                orientation: Orientation::Fixed(look_rotation(yaw, pitch)),
            },
            CameraView::ThirdPerson => CameraPose {
                position: player.position + body_rotation(yaw) * config.third_person_offset,
                orientation: Orientation::LookAt(
                    player.position + Vec3::Y * config.first_person_offset.y,
                ),
            },
            CameraView::TopDown => CameraPose {
                position: player.position + config.top_down_offset,
                orientation: Orientation::Fixed(top_down_rotation()),
            },
        }
    }
}

/// How the camera faces once it has been placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Use this rotation as-is
    Fixed(Quat),
    /// Turn toward this world point from wherever the camera ended up
    LookAt(Vec3),
}

/// Target placement for the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Target world position
    pub position: Vec3,
    /// Target facing
    pub orientation: Orientation,
}

impl CameraPose {
    /// Orient `camera` from its current position
    pub fn apply_orientation(&self, camera: &mut Transform) {
        match self.orientation {
            Orientation::Fixed(rotation) => camera.rotation = rotation,
            Orientation::LookAt(target) => camera.look_at(target, Vec3::Y),
        }
    }

    /// Move `camera` onto the pose immediately
    pub fn snap(&self, camera: &mut Transform) {
        camera.position = self.position;
        self.apply_orientation(camera);
    }

    /// Move `camera` a fraction `t` of the way to the pose, then orient it
    pub fn follow(&self, camera: &mut Transform, t: f32) {
        camera.position = camera.position.lerp(self.position, t);
        self.apply_orientation(camera);
    }
}

/// Yaw-only rotation for the player body
pub fn body_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(-yaw.to_radians())
}

/// Camera rotation for a yaw/pitch pair with no roll
pub fn look_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, -yaw.to_radians(), pitch.to_radians(), 0.0)
}

/// Straight down, with the top of the screen toward world forward (-Z)
pub fn top_down_rotation() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}
