use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::physics::{BodyParams, SpeedLimits};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Drift", inline)]
#[serde(default)]
/// Motion of floating decorations.
pub struct DriftOptions {
    /// Magnitude of the random wander force.
    pub wander_strength: f32,
    /// Spring constant pulling a decoration back to its anchor.
    pub anchor_stiffness: f32,
    /// Mass and drag of each decoration.
    pub body: BodyParams,
    /// Speed bounds of each decoration.
    pub speed: SpeedLimits,
}

impl Default for DriftOptions {
    fn default() -> Self {
        Self {
            wander_strength: 0.4,
            anchor_stiffness: 0.5,
            body: BodyParams {
                mass: 1.0,
                drag: 0.8,
            },
            speed: SpeedLimits {
                min: 0.05,
                max: 0.6,
            },
        }
    }
}
