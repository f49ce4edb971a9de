//! Minimal motion integration for scene objects.
//!
//! [`integrator`] holds the stateless force/drag/clamp steps;
//! [`drift`] uses them to float decorations around their anchors.

pub mod drift;
pub mod integrator;

pub use integrator::{
    apply_drag, apply_force, clamp_speed, integrate, step_body, BodyParams,
    SpeedLimits, SPEED_EPSILON,
};
