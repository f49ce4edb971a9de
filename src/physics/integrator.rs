//! Force, drag and speed-clamp steps for caller-owned velocity vectors.
//!
//! All steps are explicit Euler and mutate their arguments in place. None
//! of them allocate.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PondError;

/// Below this speed a velocity counts as numerical noise and is never
/// boosted up to a minimum speed.
pub const SPEED_EPSILON: f32 = 1.0e-6;

/// Mass and linear drag of a moving body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BodyParams {
    /// Body mass. Must be finite and strictly positive.
    #[schemars(range(min = 0.001))]
    pub mass: f32,
    /// Linear drag coefficient (per second).
    #[schemars(range(min = 0.0))]
    pub drag: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.5,
        }
    }
}

impl BodyParams {
    /// Check the mass and drag contracts.
    pub fn validate(&self) -> Result<(), PondError> {
        if self.mass <= 0.0 || !self.mass.is_finite() {
            return Err(PondError::invalid("mass", self.mass));
        }
        if self.drag < 0.0 || !self.drag.is_finite() {
            return Err(PondError::invalid("drag", self.drag));
        }
        Ok(())
    }
}

/// Lower and upper speed bounds for [`clamp_speed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpeedLimits {
    /// Minimum speed for a moving body.
    pub min: f32,
    /// Maximum speed.
    pub max: f32,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl SpeedLimits {
    /// Both bounds finite and non-negative, with `min <= max`.
    pub fn validate(&self) -> Result<(), PondError> {
        if self.min < 0.0 || !self.min.is_finite() {
            return Err(PondError::invalid("speed.min", self.min));
        }
        if self.max < self.min || !self.max.is_finite() {
            return Err(PondError::invalid("speed.max", self.max));
        }
        Ok(())
    }
}

/// `velocity += (force / mass) * dt`.
///
/// A zero, negative or non-finite mass, or a negative or non-finite `dt`,
/// is rejected and leaves `velocity` untouched.
pub fn apply_force(
    velocity: &mut Vec3,
    force: Vec3,
    dt: f32,
    params: &BodyParams,
) -> Result<(), PondError> {
    if params.mass <= 0.0 || !params.mass.is_finite() {
        return Err(PondError::invalid("mass", params.mass));
    }
    if dt < 0.0 || !dt.is_finite() {
        return Err(PondError::invalid("dt", dt));
    }
    *velocity += force / params.mass * dt;
    Ok(())
}

/// `velocity += (-drag * velocity) * dt`.
///
/// Single Euler step: when `drag * dt > 1` the velocity overshoots zero
/// and reverses direction.
pub fn apply_drag(velocity: &mut Vec3, dt: f32, params: &BodyParams) {
    *velocity += -params.drag * *velocity * dt;
}

/// Rescale `velocity` into `[min_speed, max_speed]`.
///
/// Velocities at or below [`SPEED_EPSILON`] are left alone.
pub fn clamp_speed(velocity: &mut Vec3, min_speed: f32, max_speed: f32) {
    let speed = velocity.length();
    if speed < min_speed && speed > SPEED_EPSILON {
        *velocity *= min_speed / speed;
    } else if speed > max_speed {
        *velocity *= max_speed / speed;
    }
}

/// Advance `position` by `velocity * dt`.
pub fn integrate(position: &mut Vec3, velocity: Vec3, dt: f32) {
    *position += velocity * dt;
}

/// Force, drag, clamp, then move: one full motion step for a body.
///
/// Invalid mass or `dt` fails before anything is touched.
pub fn step_body(
    position: &mut Vec3,
    velocity: &mut Vec3,
    force: Vec3,
    dt: f32,
    params: &BodyParams,
    limits: &SpeedLimits,
) -> Result<(), PondError> {
    apply_force(velocity, force, dt, params)?;
    apply_drag(velocity, dt, params);
    clamp_speed(velocity, limits.min, limits.max);
    integrate(position, *velocity, dt);
    Ok(())
}
