//! Smoothing and stepping helpers used by per-frame controllers
//!
//! All angles are in degrees.

use glam::Vec3;

/// Smallest smoothing time accepted by the damped springs
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Spring coefficients for a critically damped step of `dt` seconds.
///
/// Returns `(omega, decay)` where `decay` is a cubic approximation of `exp(-omega * dt)`.
fn damping(smooth_time: f32, dt: f32) -> (f32, f32) {
    let omega = 2.0 / smooth_time.max(MIN_SMOOTH_TIME);
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    (omega, decay)
}

/// Move `current` toward `target` with a critically damped spring.
///
/// `velocity` carries the spring state between calls and must be kept by the caller.
/// `smooth_time` is roughly the time it takes to reach the target. The result never
/// passes the target; when it would, it lands on it and `velocity` is zeroed.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let (omega, decay) = damping(smooth_time, dt);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let output = target + (change + temp) * decay;
    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// [`smooth_damp`] for angles: always turns the short way around.
///
/// The result is not wrapped into `[0, 360)`.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Vector form of [`smooth_damp`]
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let (omega, decay) = damping(smooth_time, dt);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let output = target + (change + temp) * decay;
    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    output
}

/// Step `current` toward `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Interpolation factor for a follow of `rate` per second over `dt`, clamped to `[0, 1]`
pub fn lerp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}
