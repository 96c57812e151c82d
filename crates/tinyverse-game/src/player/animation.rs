//! Locomotion blend parameters for the animation state machine

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tinyverse_core::move_towards;
use tracing::warn;

use crate::input::MoveAxes;

/// Highest accepted blend step rate
pub const MAX_BLEND_LERP_SPEED: f32 = 20.0;

const SPRINT_BLEND: f32 = 2.0;
const WALK_BLEND: f32 = 1.0;
const BACKWARD_BLEND: f32 = -1.5;
const LEFT_BLEND: f32 = 1.0;
const RIGHT_BLEND: f32 = -1.0;

/// Animation parameter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Parameter receiving the forward/backward blend value
    pub horizontal_param: String,
    /// Parameter receiving the left/right blend value
    pub vertical_param: String,
    /// Blend units per second the values move toward their targets
    pub lerp_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            horizontal_param: "horizontal".to_string(),
            vertical_param: "vertical".to_string(),
            lerp_speed: 10.0,
        }
    }
}

impl AnimationConfig {
    /// Clamp out-of-range values, logging each fix
    pub fn sanitize(&mut self) {
        let speed = if self.lerp_speed.is_finite() {
            self.lerp_speed.clamp(0.0, MAX_BLEND_LERP_SPEED)
        } else {
            Self::default().lerp_speed
        };
        if speed != self.lerp_speed {
            warn!("animation lerp_speed {} out of range, using {}", self.lerp_speed, speed);
            self.lerp_speed = speed;
        }
    }
}

/// Named float parameters read by the host animation state machine
#[derive(Debug, Clone, Default)]
pub struct Animator {
    floats: HashMap<String, f32>,
}

impl Animator {
    /// Create an animator with no parameters set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a float parameter
    pub fn set_float(&mut self, name: &str, value: f32) {
        if let Some(slot) = self.floats.get_mut(name) {
            *slot = value;
        } else {
            self.floats.insert(name.to_string(), value);
        }
    }

    /// Read a float parameter; unset parameters read as 0
    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }
}

/// Pair of locomotion blend values
///
/// `horizontal` is the forward axis (sprint 2, walk 1, backward -1.5) and
/// `vertical` the sideways axis (left 1, right -1), matching the blend tree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendTargets {
    pub horizontal: f32,
    pub vertical: f32,
}

impl BlendTargets {
    /// Blend values the animation should settle on for this input
    pub fn from_input(axes: MoveAxes, sprint_held: bool) -> Self {
        let horizontal = if axes.z > 0.0 {
            if sprint_held {
                SPRINT_BLEND
            } else {
                WALK_BLEND
            }
        } else if axes.z < 0.0 {
            BACKWARD_BLEND
        } else {
            0.0
        };

        let vertical = if axes.x < 0.0 {
            LEFT_BLEND
        } else if axes.x > 0.0 {
            RIGHT_BLEND
        } else {
            0.0
        };

        Self {
            horizontal,
            vertical,
        }
    }

    /// Step both values toward `target` by at most `max_delta`
    pub fn step_towards(self, target: BlendTargets, max_delta: f32) -> Self {
        Self {
            horizontal: move_towards(self.horizontal, target.horizontal, max_delta),
            vertical: move_towards(self.vertical, target.vertical, max_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_targets() {
        assert_eq!(
            BlendTargets::from_input(MoveAxes::new(0.0, 1.0), true),
            BlendTargets { horizontal: 2.0, vertical: 0.0 }
        );
        assert_eq!(
            BlendTargets::from_input(MoveAxes::new(-1.0, 1.0), false),
            BlendTargets { horizontal: 1.0, vertical: 1.0 }
        );
        assert_eq!(
            BlendTargets::from_input(MoveAxes::new(1.0, -1.0), true),
            BlendTargets { horizontal: -1.5, vertical: -1.0 }
        );
        assert_eq!(
            BlendTargets::from_input(MoveAxes::default(), true),
            BlendTargets::default()
        );
    }

    #[test]
    fn test_step_towards_is_rate_limited() {
        let target = BlendTargets { horizontal: 2.0, vertical: -1.0 };
        let stepped = BlendTargets::default().step_towards(target, 0.5);
        assert_eq!(stepped, BlendTargets { horizontal: 0.5, vertical: -0.5 });

        let settled = stepped.step_towards(target, 10.0);
        assert_eq!(settled, target);
    }

    #[test]
    fn test_animator_parameters() {
        let mut animator = Animator::new();
        assert_eq!(animator.get_float("horizontal"), 0.0);
        animator.set_float("horizontal", 1.25);
        animator.set_float("horizontal", 1.5);
        assert_eq!(animator.get_float("horizontal"), 1.5);
    }

    #[test]
    fn test_sanitize_lerp_speed() {
        let mut config = AnimationConfig {
            lerp_speed: f32::NAN,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.lerp_speed, 10.0);

        config.lerp_speed = f32::INFINITY;
        config.sanitize();
        assert_eq!(config.lerp_speed, 10.0);
    }
}
