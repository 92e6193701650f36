//! Frame-rate aware interpolation.
//!
//! `interp_to` moves a value a fraction `dt * speed` of the remaining
//! distance each call, so it approaches the target exponentially and never
//! overshoots it.

use zebomber_core::constants::INTERP_SNAP_EPSILON;
use zebomber_core::types::normalize_degrees;

/// Linear blend between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate `current` toward `target` at `speed` per second.
///
/// A non-positive speed jumps straight to the target.
pub fn interp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    let alpha = (dt * speed).clamp(0.0, 1.0);
    if alpha >= 1.0 || dist * dist < INTERP_SNAP_EPSILON {
        return target;
    }
    // Rounding in the blend must not carry the value past either end.
    (current + dist * alpha).clamp(current.min(target), current.max(target))
}

/// Interpolate a yaw angle in degrees along the shortest arc.
/// The result is normalized into (-180, 180].
pub fn interp_yaw_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return normalize_degrees(target);
    }
    let delta = normalize_degrees(target - current);
    let alpha = (dt * speed).clamp(0.0, 1.0);
    if alpha >= 1.0 || delta * delta < INTERP_SNAP_EPSILON {
        return normalize_degrees(target);
    }
    normalize_degrees(current + delta * alpha)
}
