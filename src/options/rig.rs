use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera Rig", inline)]
#[serde(default)]
/// Framing constants used by the camera rig.
pub struct RigOptions {
    /// Scene object used as the default focal point.
    #[schemars(skip)]
    pub pond_name: String,
    /// Closest approach to an inspectable target.
    pub min_distance_inspectable: f32,
    /// Closest approach to any other target.
    pub min_distance: f32,
    /// Farthest the user may dolly out while focused.
    pub max_distance: f32,
    /// Horizontal eye offset of the overview pose.
    pub overview_offset: f32,
    /// Horizontal eye offset of the inside pose.
    pub inside_offset: f32,
    /// Eye height above the pond in the inside pose.
    pub inside_lift: f32,
    /// Eye height added while no panel is docked.
    pub undocked_tilt: f32,
    /// Eye height above a focused object.
    pub object_lift: f32,
    /// Base eye distance from a focused object at aspect >= 1.
    pub object_distance: f32,
    /// Effective aspect used for viewports narrower than square.
    #[schemars(range(min = 0.1, max = 1.0))]
    pub narrow_aspect: f32,
    /// Update ticks the docked flag lags behind its source.
    #[schemars(range(min = 0, max = 8))]
    pub docked_delay_ticks: usize,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            pond_name: "pond".to_owned(),
            min_distance_inspectable: 1.0,
            min_distance: 5.0,
            max_distance: 20.0,
            overview_offset: 10.0,
            inside_offset: 0.8,
            inside_lift: 0.3,
            undocked_tilt: 1.5,
            object_lift: 2.0,
            object_distance: 6.0,
            narrow_aspect: 0.9,
            docked_delay_ticks: 1,
        }
    }
}
