//! Movement configuration and speed selection

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::input::MoveAxes;

/// Longest accepted horizontal smoothing time in seconds
pub const MAX_MOVEMENT_SMOOTH_TIME: f32 = 1.0;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Forward walking speed in meters per second
    pub walk_speed: f32,
    /// Forward sprinting speed in meters per second
    pub run_speed: f32,
    /// Backward speed in meters per second
    pub backward_speed: f32,
    /// Pure sideways speed in meters per second
    pub strafe_speed: f32,
    /// Time for horizontal velocity to catch up with input
    pub movement_smooth_time: f32,
    /// Vertical velocity set when jumping
    pub jump_force: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Vertical velocity kept while grounded, so the capsule stays pressed to the floor
    pub ground_stick_velocity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.5,
            run_speed: 5.0,
            backward_speed: 3.0,
            strafe_speed: 3.5,
            movement_smooth_time: 0.1,
            jump_force: 7.0,
            gravity: 20.0,
            ground_stick_velocity: -2.0,
        }
    }
}

impl MovementConfig {
    /// Target ground speed for the given input
    ///
    /// Forward (including diagonals) walks or sprints, backward uses the backward
    /// speed, and only pure sideways input strafes. Sprint only applies going forward.
    pub fn target_speed(&self, axes: MoveAxes, sprint_held: bool) -> f32 {
        if !axes.is_moving() {
            return 0.0;
        }

        if axes.z > 0.0 {
            if sprint_held {
                self.run_speed
            } else {
                self.walk_speed
            }
        } else if axes.z < 0.0 {
            self.backward_speed
        } else {
            self.strafe_speed
        }
    }

    /// Clamp out-of-range values, logging each fix
    pub fn sanitize(&mut self) {
        let smooth = if self.movement_smooth_time.is_finite() {
            self.movement_smooth_time.clamp(0.0, MAX_MOVEMENT_SMOOTH_TIME)
        } else {
            Self::default().movement_smooth_time
        };
        if smooth != self.movement_smooth_time {
            warn!(
                "movement_smooth_time {} out of range, using {}",
                self.movement_smooth_time, smooth
            );
            self.movement_smooth_time = smooth;
        }
    }
}
