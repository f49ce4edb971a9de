use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and smoothing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(
        title = "Field of View",
        range(min = 20.0, max = 90.0),
        extend("step" = 1.0)
    )]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Approximate seconds to settle on a new look-at target.
    #[schemars(
        title = "Smooth Time",
        range(min = 0.01, max = 2.0),
        extend("step" = 0.01)
    )]
    pub smooth_time: f32,
    /// Smoothing used while the user is dragging.
    #[schemars(
        title = "Drag Smooth Time",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub dragging_smooth_time: f32,
    /// Eye position before any target has been issued.
    #[schemars(skip)]
    pub initial_eye: [f32; 3],
}

impl CameraOptions {
    /// Initial eye position as a vector.
    #[must_use]
    pub fn initial_eye(&self) -> Vec3 {
        Vec3::from_array(self.initial_eye)
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 500.0,
            smooth_time: 0.25,
            dragging_smooth_time: 0.125,
            initial_eye: [0.0, 12.0, 16.0],
        }
    }
}
