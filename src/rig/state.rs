use glam::Vec3;

use crate::device::DeviceProfile;

/// Framing used while the pond itself is the focus target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PondPose {
    /// Eye above and back from the pond center.
    Overview,
    /// Eye close to the water, slightly above it.
    Inside,
}

/// Where the rig is currently pointing the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigState {
    /// No focus target resolved.
    #[default]
    Unfocused,
    /// Focused on the pond.
    FocusedOnPond(PondPose),
    /// Focused on some other scene object.
    FocusedOnObject,
}

impl RigState {
    /// Whether a focus target is active.
    #[must_use]
    pub fn is_focused(self) -> bool {
        self != Self::Unfocused
    }
}

/// Current navigation route as reported by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSignal {
    /// Whether the focus route pattern matched.
    pub matched: bool,
    /// Routed object id, if any.
    pub id: Option<String>,
}

impl RouteSignal {
    /// A matched route focusing `id`.
    #[must_use]
    pub fn focus(id: impl Into<String>) -> Self {
        Self {
            matched: true,
            id: Some(id.into()),
        }
    }

    /// No focus route.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }

    /// Routed id, only when the route matched.
    #[must_use]
    pub fn focus_id(&self) -> Option<&str> {
        if self.matched {
            self.id.as_deref()
        } else {
            None
        }
    }
}

/// Everything the rig reads on one update tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RigInput {
    /// Focus route.
    pub route: RouteSignal,
    /// Whether the docked overlay panel is visible (source value, not yet
    /// delayed).
    pub panel_docked: bool,
    /// Whether markers/overlay UI are shown over the pond.
    pub markers_visible: bool,
    /// Active device profile.
    pub profile: DeviceProfile,
    /// Viewport width / height.
    pub aspect: f32,
}

impl Default for RigInput {
    fn default() -> Self {
        Self {
            route: RouteSignal::unmatched(),
            panel_docked: false,
            markers_visible: true,
            profile: DeviceProfile::Desktop,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Focus facts derived on the last retarget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    /// Name of the resolved focus object.
    pub active_id: Option<String>,
    /// Docked flag as seen by the rig (already delayed).
    pub is_panel_docked: bool,
    /// Whether the resolved focus object is the pond.
    pub is_pond_focused: bool,
}

/// Eye and look-at target issued to the camera controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub eye: Vec3,
    /// Look-at target.
    pub target: Vec3,
}
