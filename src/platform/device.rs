//! Device capability detection

use crate::settings::DeviceProfile;

/// Inputs that decide the device profile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Capabilities {
    pub coarse_pointer: bool,
    pub reduced_motion: bool,
    pub viewport_width: f64,
}

impl Capabilities {
    /// Reduced when any of touch input, a reduced-motion preference or a
    /// narrow viewport is present
    pub fn profile(&self) -> DeviceProfile {
        if self.coarse_pointer
            || self.reduced_motion
            || self.viewport_width < crate::consts::REDUCED_VIEWPORT_WIDTH
        {
            DeviceProfile::Reduced
        } else {
            DeviceProfile::Full
        }
    }

    /// Query the browser once at startup
    #[cfg(target_arch = "wasm32")]
    pub fn query() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let matches = |query: &str| {
            window
                .match_media(query)
                .ok()
                .flatten()
                .map(|mql| mql.matches())
                .unwrap_or(false)
        };
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);

        Self {
            coarse_pointer: matches("(pointer: coarse)"),
            reduced_motion: matches("(prefers-reduced-motion: reduce)"),
            viewport_width,
        }
    }

    /// Native has no media queries; assume a desktop
    #[cfg(not(target_arch = "wasm32"))]
    pub fn query() -> Self {
        Self {
            coarse_pointer: false,
            reduced_motion: false,
            viewport_width: f64::INFINITY,
        }
    }
}

impl DeviceProfile {
    /// Detect the profile for this device
    pub fn detect() -> Self {
        let caps = Capabilities::query();
        let profile = caps.profile();
        log::info!("Device profile: {} ({:?})", profile.as_str(), caps);
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Capabilities {
        Capabilities {
            coarse_pointer: false,
            reduced_motion: false,
            viewport_width: 1440.0,
        }
    }

    #[test]
    fn test_desktop_is_full() {
        assert_eq!(desktop().profile(), DeviceProfile::Full);
    }

    #[test]
    fn test_any_constraint_reduces() {
        let touch = Capabilities {
            coarse_pointer: true,
            ..desktop()
        };
        let calm = Capabilities {
            reduced_motion: true,
            ..desktop()
        };
        let narrow = Capabilities {
            viewport_width: 767.0,
            ..desktop()
        };
        for caps in [touch, calm, narrow] {
            assert_eq!(caps.profile(), DeviceProfile::Reduced);
        }
        let edge = Capabilities {
            viewport_width: 768.0,
            ..desktop()
        };
        assert_eq!(edge.profile(), DeviceProfile::Full);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_detect_is_full() {
        assert_eq!(DeviceProfile::detect(), DeviceProfile::Full);
    }
}
