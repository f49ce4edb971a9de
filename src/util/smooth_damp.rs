//! Critically damped spring smoothing.
//!
//! Frame-rate independent approximation of a critically damped spring,
//! used by the camera controller to chase its goal pose.

use glam::Vec3;

/// Move `current` toward `target`, updating `velocity` in place.
///
/// `smooth_time` is roughly the time to reach the target. The result never
/// overshoots: once the spring would pass the target it lands on it and
/// the velocity is zeroed.
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
    let smooth_time = smooth_time.max(1.0e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let output = target + (change + temp) * decay;

    // Overshoot: the output moved past the target along the travel axis.
    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    output
}
