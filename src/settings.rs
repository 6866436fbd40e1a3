//! Backdrop settings
//!
//! Built once at startup from the device profile, optionally overridden by a
//! JSON blob in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::BackdropError;

/// Device class, computed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceProfile {
    /// Desktop with a fine pointer
    #[default]
    Full,
    /// Touch, small viewport or reduced-motion preference
    Reduced,
}

impl DeviceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Full => "Full",
            DeviceProfile::Reduced => "Reduced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" | "desktop" => Some(DeviceProfile::Full),
            "reduced" | "mobile" => Some(DeviceProfile::Reduced),
            _ => None,
        }
    }

    pub fn is_reduced(&self) -> bool {
        *self == DeviceProfile::Reduced
    }

    pub fn orbit_count(&self) -> usize {
        match self {
            DeviceProfile::Full => 3,
            DeviceProfile::Reduced => 2,
        }
    }

    pub fn planets_per_orbit(&self) -> usize {
        match self {
            DeviceProfile::Full => 2,
            DeviceProfile::Reduced => 1,
        }
    }

    pub fn particle_count(&self) -> usize {
        match self {
            DeviceProfile::Full => 15,
            DeviceProfile::Reduced => 8,
        }
    }

    pub fn star_count(&self) -> usize {
        match self {
            DeviceProfile::Full => 20,
            DeviceProfile::Reduced => 12,
        }
    }

    pub fn snowflake_count(&self) -> usize {
        match self {
            DeviceProfile::Full => 60,
            DeviceProfile::Reduced => 25,
        }
    }

    /// O(n²) particle link pass
    pub fn connections_enabled(&self) -> bool {
        !self.is_reduced()
    }

    /// Touch devices have no hover pointer to react to
    pub fn pointer_repulsion_enabled(&self) -> bool {
        !self.is_reduced()
    }
}

/// Backdrop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: DeviceProfile,

    // === Populations ===
    pub orbit_count: usize,
    pub planets_per_orbit: usize,
    pub particle_count: usize,
    pub star_count: usize,
    pub snowflake_count: usize,

    // === Effects ===
    /// Draw links between nearby particles
    pub connections: bool,
    /// Push particles away from the pointer
    pub pointer_repulsion: bool,
    /// Falling snow overlay
    pub snow: bool,
    /// Regular shooting stars
    pub shooting_stars: bool,
    /// Rare meteor shower bursts
    pub meteor_showers: bool,
    /// Particle opacity/radius breathing
    pub particle_breathing: bool,

    // === Scheduling ===
    /// Suspend spawn timers while the page is hidden
    pub pause_spawners_when_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_profile(DeviceProfile::Full)
    }
}

impl Settings {
    /// Create settings from a device profile (applies profile defaults)
    pub fn from_profile(profile: DeviceProfile) -> Self {
        Self {
            profile,
            orbit_count: profile.orbit_count(),
            planets_per_orbit: profile.planets_per_orbit(),
            particle_count: profile.particle_count(),
            star_count: profile.star_count(),
            snowflake_count: profile.snowflake_count(),
            connections: profile.connections_enabled(),
            pointer_repulsion: profile.pointer_repulsion_enabled(),
            snow: false,
            shooting_stars: true,
            meteor_showers: true,
            particle_breathing: true,
            pause_spawners_when_hidden: true,
        }
    }

    /// Effective snowflake count (0 when snow is off)
    pub fn effective_snowflakes(&self) -> usize {
        if self.snow { self.snowflake_count } else { 0 }
    }

    /// Parse settings from JSON; missing fields take Full-profile defaults
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply a JSON override on top of `profile` defaults.
    ///
    /// The device profile always wins: `profile` is kept as given, and a
    /// Reduced device never gets the link pass or pointer repulsion back.
    pub fn from_json_with(profile: DeviceProfile, json: &str) -> Result<Self, BackdropError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::from_profile(profile))?;
        if let Some(base) = merged.as_object_mut() {
            base.extend(overrides);
        }

        let mut settings: Self = serde_json::from_value(merged)?;
        settings.profile = profile;
        if profile.is_reduced() {
            settings.connections = false;
            settings.pointer_repulsion = false;
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, BackdropError> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orbit_backdrop_settings";

    /// Load settings override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(profile: DeviceProfile) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json_with(profile, &json) {
                    Ok(settings) => {
                        log::info!("Loaded settings override from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using {} profile settings", profile.as_str());
        Self::from_profile(profile)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(profile: DeviceProfile) -> Self {
        Self::from_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_profile_lowers_counts() {
        let full = Settings::from_profile(DeviceProfile::Full);
        let reduced = Settings::from_profile(DeviceProfile::Reduced);

        assert_eq!((full.orbit_count, full.planets_per_orbit), (3, 2));
        assert_eq!((reduced.orbit_count, reduced.planets_per_orbit), (2, 1));
        assert!(reduced.particle_count < full.particle_count);
        assert!(reduced.star_count < full.star_count);
        assert!(full.connections && !reduced.connections);
        assert!(full.pointer_repulsion && !reduced.pointer_repulsion);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(DeviceProfile::from_str("Mobile"), Some(DeviceProfile::Reduced));
        assert_eq!(DeviceProfile::from_str("full"), Some(DeviceProfile::Full));
        assert_eq!(DeviceProfile::from_str("tablet"), None);
    }

    #[test]
    fn test_snow_off_by_default() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_snowflakes(), 0);
        settings.snow = true;
        assert_eq!(settings.effective_snowflakes(), 60);
    }

    #[test]
    fn test_partial_json_override() {
        let settings = Settings::from_json(r#"{"snow": true, "particle_count": 40}"#).unwrap();
        assert!(settings.snow);
        assert_eq!(settings.particle_count, 40);
        assert_eq!(settings.orbit_count, 3);

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_override_keeps_reduced_profile() {
        let settings =
            Settings::from_json_with(DeviceProfile::Reduced, r#"{"snow": true}"#).unwrap();
        let reduced = Settings::from_profile(DeviceProfile::Reduced);

        assert!(settings.snow);
        assert_eq!(settings.profile, DeviceProfile::Reduced);
        assert!(!settings.connections);
        assert!(!settings.pointer_repulsion);
        assert_eq!(settings.orbit_count, reduced.orbit_count);
        assert_eq!(settings.planets_per_orbit, reduced.planets_per_orbit);
        assert_eq!(settings.particle_count, reduced.particle_count);
        assert_eq!(settings.star_count, reduced.star_count);
        assert_eq!(settings.effective_snowflakes(), reduced.snowflake_count);
    }

    #[test]
    fn test_override_cannot_lift_reduced_limits() {
        let json = r#"{"profile": "Full", "connections": true, "pointer_repulsion": true, "particle_count": 12}"#;
        let settings = Settings::from_json_with(DeviceProfile::Reduced, json).unwrap();

        assert_eq!(settings.profile, DeviceProfile::Reduced);
        assert!(!settings.connections);
        assert!(!settings.pointer_repulsion);
        assert_eq!(settings.particle_count, 12);
    }

    #[test]
    fn test_override_on_full_profile() {
        let settings =
            Settings::from_json_with(DeviceProfile::Full, r#"{"connections": false}"#).unwrap();
        assert!(!settings.connections);
        assert!(settings.pointer_repulsion);
        assert_eq!(settings.particle_count, 15);
    }

    #[test]
    fn test_override_must_be_object() {
        assert!(matches!(
            Settings::from_json_with(DeviceProfile::Full, "42"),
            Err(BackdropError::Settings(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(BackdropError::Settings(_))
        ));
    }
}
