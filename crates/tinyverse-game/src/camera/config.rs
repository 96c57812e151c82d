//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Longest accepted look smoothing time in seconds
pub const MAX_ROTATION_SMOOTH_TIME: f32 = 0.5;

/// Camera configuration
///
/// Angles are in degrees. Offsets are in meters, with +Z behind the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye offset from the player's feet, in the player's local space
    pub first_person_offset: Vec3,
    /// Offset from the player, rotated by the smoothed yaw
    pub third_person_offset: Vec3,
    /// World-space offset above the player
    pub top_down_offset: Vec3,
    /// Horizontal look speed (degrees per look-axis unit per second)
    pub sensitivity_x: f32,
    /// Vertical look speed (degrees per look-axis unit per second)
    pub sensitivity_y: f32,
    /// Time for the smoothed yaw/pitch to catch up with the raw look angles
    pub rotation_smooth_time: f32,
    /// Lowest pitch (looking down)
    pub pitch_min: f32,
    /// Highest pitch (looking up)
    pub pitch_max: f32,
    /// Lock and hide the cursor while playing
    pub lock_cursor: bool,
    /// How fast the first-person camera catches up with the eye position
    pub first_person_follow_rate: f32,
    /// How fast the third-person and top-down cameras catch up with their anchor
    pub follow_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            first_person_offset: Vec3::new(0.0, 0.8, 0.0),
            third_person_offset: Vec3::new(0.0, 3.0, 5.0),
            top_down_offset: Vec3::new(0.0, 10.0, 0.0),
            sensitivity_x: 200.0,
            sensitivity_y: 200.0,
            rotation_smooth_time: 0.05,
            pitch_min: -80.0,
            pitch_max: 60.0,
            lock_cursor: true,
            first_person_follow_rate: 20.0,
            follow_rate: 10.0,
        }
    }
}

impl CameraConfig {
    /// Clamp out-of-range values, logging each fix
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        let smooth = if self.rotation_smooth_time.is_finite() {
            self.rotation_smooth_time.clamp(0.0, MAX_ROTATION_SMOOTH_TIME)
        } else {
            defaults.rotation_smooth_time
        };
        if smooth != self.rotation_smooth_time {
            warn!(
                "rotation_smooth_time {} out of range, using {}",
                self.rotation_smooth_time, smooth
            );
            self.rotation_smooth_time = smooth;
        }

        if !self.pitch_min.is_finite() || !self.pitch_max.is_finite() {
            warn!(
                "pitch limits {}..{} are not finite, using defaults",
                self.pitch_min, self.pitch_max
            );
            self.pitch_min = defaults.pitch_min;
            self.pitch_max = defaults.pitch_max;
        }

        if self.pitch_min > self.pitch_max {
            warn!(
                "pitch_min {} above pitch_max {}, swapping",
                self.pitch_min, self.pitch_max
            );
            std::mem::swap(&mut self.pitch_min, &mut self.pitch_max);
        }
    }
}
