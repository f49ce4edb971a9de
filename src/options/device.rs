use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Interaction and framing parameters for one device profile.
pub struct ProfileParams {
    /// Eye height of the overview pose.
    pub overview_height: f32,
    /// Orbit sensitivity (radians per pixel, scaled).
    #[schemars(range(min = 0.1, max = 4.0))]
    pub rotate_speed: f32,
    /// Pan (truck) sensitivity.
    #[schemars(range(min = 0.1, max = 4.0))]
    pub pan_speed: f32,
    /// Dolly (zoom) sensitivity.
    #[schemars(range(min = 0.01, max = 4.0))]
    pub dolly_speed: f32,
    /// Floor for the focused minimum distance.
    pub min_focus_distance: f32,
}

impl ProfileParams {
    /// Desktop defaults.
    #[must_use]
    pub fn desktop() -> Self {
        Self {
            overview_height: 8.0,
            rotate_speed: 1.0,
            pan_speed: 2.0,
            dolly_speed: 1.0,
            min_focus_distance: 1.0,
        }
    }

    /// Mobile/touch defaults: higher overview, gentler gestures.
    #[must_use]
    pub fn mobile() -> Self {
        Self {
            overview_height: 14.0,
            rotate_speed: 0.6,
            pan_speed: 1.0,
            dolly_speed: 0.4,
            min_focus_distance: 1.0,
        }
    }
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self::desktop()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Device", inline)]
#[serde(default)]
/// Per-profile parameters and classifier thresholds.
pub struct DeviceOptions {
    /// Touch-capable viewports at most this wide count as mobile.
    #[schemars(range(min = 200.0, max = 2000.0))]
    pub mobile_max_width: f32,
    /// Parameters used on desktop (fine pointer) devices.
    #[serde(deserialize_with = "desktop_params")]
    #[schemars(with = "ProfileParams")]
    pub desktop: ProfileParams,
    /// Parameters used on mobile/touch devices.
    #[serde(deserialize_with = "mobile_params")]
    #[schemars(with = "ProfileParams")]
    pub mobile: ProfileParams,
}

/// Partially specified profile; missing fields come from the profile's own
/// defaults rather than [`ProfileParams::default`].
#[derive(Deserialize, Default)]
#[serde(default)]
struct ProfileOverrides {
    overview_height: Option<f32>,
    rotate_speed: Option<f32>,
    pan_speed: Option<f32>,
    dolly_speed: Option<f32>,
    min_focus_distance: Option<f32>,
}

impl ProfileOverrides {
    fn over(self, base: ProfileParams) -> ProfileParams {
        ProfileParams {
            overview_height: self
                .overview_height
                .unwrap_or(base.overview_height),
            rotate_speed: self.rotate_speed.unwrap_or(base.rotate_speed),
            pan_speed: self.pan_speed.unwrap_or(base.pan_speed),
            dolly_speed: self.dolly_speed.unwrap_or(base.dolly_speed),
            min_focus_distance: self
                .min_focus_distance
                .unwrap_or(base.min_focus_distance),
        }
    }
}

fn desktop_params<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ProfileParams, D::Error> {
    ProfileOverrides::deserialize(deserializer)
        .map(|o| o.over(ProfileParams::desktop()))
}

fn mobile_params<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ProfileParams, D::Error> {
    ProfileOverrides::deserialize(deserializer)
        .map(|o| o.over(ProfileParams::mobile()))
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            desktop: ProfileParams::desktop(),
            mobile: ProfileParams::mobile(),
        }
    }
}
