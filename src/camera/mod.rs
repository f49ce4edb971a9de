//! Camera system for the pond scene.
//!
//! Provides a smoothed orbit camera driven by discrete look-at commands and
//! the pointer input that steers it between commands.

/// Smoothed orbit controller and the [`controller::CameraControls`]
/// contract the rig drives.
pub mod controller;
/// Core camera struct and view/projection math.
pub mod core;
/// Pointer/touch gesture handling.
pub mod input;

pub use controller::{CameraControls, PrimaryAction, SmoothCamera};
