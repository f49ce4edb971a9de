//! Desktop vs. mobile classification.
//!
//! The profile only selects numeric constants (overview height, gesture
//! speeds); it never changes rig logic.

use serde::{Deserialize, Serialize};

use crate::options::{DeviceOptions, ProfileParams};

/// Coarse runtime device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceProfile {
    /// Mouse/trackpad with a fine pointer.
    #[default]
    Desktop,
    /// Touch-first phone or tablet.
    Mobile,
}

/// Facts reported by the host environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSignals {
    /// Maximum simultaneous touch points (0 when touch is unsupported).
    pub max_touch_points: u32,
    /// Whether the primary pointer is coarse (a finger).
    pub coarse_pointer: bool,
    /// Viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Browser/host user agent, if known.
    pub user_agent: Option<String>,
}

const MOBILE_AGENT_MARKERS: &[&str] =
    &["android", "iphone", "ipad", "ipod", "mobile", "silk", "kindle"];

impl DeviceProfile {
    /// Classify the environment described by `signals`.
    ///
    /// A mobile user agent wins outright. Otherwise a touch-capable device
    /// is mobile when its primary pointer is coarse or its viewport is no
    /// wider than `options.mobile_max_width`.
    #[must_use]
    pub fn resolve(signals: &DeviceSignals, options: &DeviceOptions) -> Self {
        let agent_is_mobile = signals.user_agent.as_deref().is_some_and(|ua| {
            let ua = ua.to_ascii_lowercase();
            MOBILE_AGENT_MARKERS.iter().any(|m| ua.contains(m))
        });
        if agent_is_mobile {
            return Self::Mobile;
        }
        let touch = signals.max_touch_points > 0;
        let narrow = signals.viewport_width > 0.0
            && signals.viewport_width <= options.mobile_max_width;
        if touch && (signals.coarse_pointer || narrow) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Parameters for this profile.
    #[must_use]
    pub fn params(self, options: &DeviceOptions) -> ProfileParams {
        match self {
            Self::Desktop => options.desktop,
            Self::Mobile => options.mobile,
        }
    }

    /// Whether this is the mobile profile.
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(touch: u32, coarse: bool, width: f32) -> DeviceSignals {
        DeviceSignals {
            max_touch_points: touch,
            coarse_pointer: coarse,
            viewport_width: width,
            user_agent: None,
        }
    }

    #[test]
    fn plain_desktop() {
        let opts = DeviceOptions::default();
        let profile = DeviceProfile::resolve(&signals(0, false, 1440.0), &opts);
        assert_eq!(profile, DeviceProfile::Desktop);
    }

    #[test]
    fn coarse_touch_is_mobile() {
        let opts = DeviceOptions::default();
        let profile = DeviceProfile::resolve(&signals(5, true, 1024.0), &opts);
        assert_eq!(profile, DeviceProfile::Mobile);
    }

    #[test]
    fn touch_laptop_with_wide_viewport_stays_desktop() {
        let opts = DeviceOptions::default();
        let profile =
            DeviceProfile::resolve(&signals(10, false, 1600.0), &opts);
        assert_eq!(profile, DeviceProfile::Desktop);
    }

    #[test]
    fn narrow_touch_viewport_is_mobile() {
        let opts = DeviceOptions::default();
        let profile = DeviceProfile::resolve(&signals(1, false, 600.0), &opts);
        assert!(profile.is_mobile());
    }

    #[test]
    fn narrow_window_without_touch_is_desktop() {
        let opts = DeviceOptions::default();
        let profile = DeviceProfile::resolve(&signals(0, false, 500.0), &opts);
        assert_eq!(profile, DeviceProfile::Desktop);
    }

    #[test]
    fn mobile_user_agent_wins() {
        let opts = DeviceOptions::default();
        let mut s = signals(0, false, 1920.0);
        s.user_agent = Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_owned(),
        );
        assert_eq!(DeviceProfile::resolve(&s, &opts), DeviceProfile::Mobile);
    }

    #[test]
    fn params_follow_profile() {
        let opts = DeviceOptions::default();
        assert_eq!(DeviceProfile::Desktop.params(&opts), opts.desktop);
        assert_eq!(DeviceProfile::Mobile.params(&opts), opts.mobile);
        assert!(
            opts.mobile.overview_height != opts.desktop.overview_height
        );
    }
}
