//! Core types shared by the camera rig and the player

use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform representing position, rotation, and scale
///
/// Right-handed, +Y up, -Z forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Map a local-space offset to world space, honoring rotation and scale but not position
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * (self.scale * local)
    }

    /// Map a local-space direction to world space (rotation only)
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Heading in degrees within `[0, 360)`, positive turning right
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        (-yaw.to_degrees()).rem_euclid(360.0)
    }

    /// Rotate so that forward points at `target`
    ///
    /// Leaves the rotation untouched when `target` is the current position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(back) = (self.position - target).try_normalize() else {
            return;
        };
        let right = up
            .cross(back)
            .try_normalize()
            .unwrap_or_else(|| back.any_orthonormal_vector());
        let up = back.cross(right);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut transform = Transform::from_position(Vec3::new(0.0, 3.0, 5.0));
        let target = Vec3::new(0.0, 0.8, 0.0);
        transform.look_at(target, Vec3::Y);

        let expected = (target - transform.position).normalize();
        assert!(transform.forward().distance(expected) < 1e-4);
        assert!(transform.right().y.abs() < 1e-4);
    }

    #[test]
    fn test_look_at_same_point_is_noop() {
        let mut transform = Transform::from_position(Vec3::ONE);
        transform.look_at(Vec3::ONE, Vec3::Y);
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_transform_vector_uses_scale() {
        let transform = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        };
        assert_eq!(transform.transform_vector(Vec3::Y), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(transform.transform_direction(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_yaw_degrees_turns_right() {
        let transform =
            Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(-90f32.to_radians()));
        assert!((transform.yaw_degrees() - 90.0).abs() < 1e-3);
        assert!(transform.forward().distance(Vec3::X) < 1e-4);
    }
}
