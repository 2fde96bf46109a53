use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{compositor::SpotlightStyle, section::SectionId, theme::Theme};

/// Errors produced while loading [`SettingsEffects`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Active section detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    /// Distance of the detection line from the top of the viewport
    pub detection_line: f32,

    /// Sections in detection order; earlier entries win ties
    pub order: Vec<SectionId>,
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            detection_line: 100.,
            order: SectionId::ALL.to_vec(),
        }
    }
}

/// Magnification of hero text near the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsProximity {
    /// Radius within which elements grow; 76 units is roughly 2cm on a typical screen
    pub radius: f32,

    /// Extra scale at zero distance
    pub max_boost: f32,

    /// Duration of the scale transition in seconds
    pub transition_secs: f32,
}

impl Default for SettingsProximity {
    fn default() -> Self {
        Self {
            radius: 76.,
            max_boost: 0.1,
            transition_secs: 0.75,
        }
    }
}

impl SettingsProximity {
    /// Scale transition length. Values a [`Duration`] can't hold fall back to no transition.
    pub fn transition(&self) -> Duration {
        Duration::try_from_secs_f32(self.transition_secs).unwrap_or(Duration::ZERO)
    }
}

/// Touch device behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsTouch {
    /// How long the spotlight stays after a touch, fading out linearly
    pub fade_millis: u64,
}

impl Default for SettingsTouch {
    fn default() -> Self {
        Self { fade_millis: 1000 }
    }
}

impl SettingsTouch {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_millis)
    }
}

/// Custom cursor marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsCursor {
    /// Outer diameter of the marker
    pub size: f32,

    /// Width of the marker ring
    pub ring_width: f32,

    /// Unmultiplied rgba ring color on a dark page
    pub color_dark: [u8; 4],

    /// Unmultiplied rgba ring color on a light page
    pub color_light: [u8; 4],
}

impl Default for SettingsCursor {
    fn default() -> Self {
        Self {
            size: 6.,
            ring_width: 2.,
            color_dark: [255, 255, 255, 153],
            color_light: [23, 23, 23, 153],
        }
    }
}

impl SettingsCursor {
    pub fn color(&self, theme: Theme) -> [u8; 4] {
        match theme {
            Theme::Dark => self.color_dark,
            Theme::Light => self.color_light,
        }
    }
}

/// All tunables of the effects engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsEffects {
    pub section: SettingsSection,
    pub proximity: SettingsProximity,
    pub touch: SettingsTouch,
    pub cursor: SettingsCursor,

    /// Spotlight layers, at most one per trigger theme
    pub spotlights: Vec<SpotlightStyle>,
}

impl Default for SettingsEffects {
    fn default() -> Self {
        Self {
            section: SettingsSection::default(),
            proximity: SettingsProximity::default(),
            touch: SettingsTouch::default(),
            cursor: SettingsCursor::default(),
            spotlights: vec![SpotlightStyle::dark(), SpotlightStyle::light()],
        }
    }
}

impl SettingsEffects {
    /// Parses settings from json; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed json and [`ConfigError::Invalid`] when a
    /// value fails [`SettingsEffects::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.section.detection_line.is_finite() {
            return Err(ConfigError::invalid("section.detection_line", "must be finite"));
        }
        if self.section.order.is_empty() {
            return Err(ConfigError::invalid("section.order", "must not be empty"));
        }
        for (i, section) in self.section.order.iter().enumerate() {
            if self.section.order[..i].contains(section) {
                return Err(ConfigError::invalid(
                    "section.order",
                    format!("`{section}` listed twice"),
                ));
            }
        }

        if !(self.proximity.radius.is_finite() && self.proximity.radius > 0.) {
            return Err(ConfigError::invalid("proximity.radius", "must be positive"));
        }
        if !(self.proximity.max_boost.is_finite() && self.proximity.max_boost >= 0.) {
            return Err(ConfigError::invalid("proximity.max_boost", "must not be negative"));
        }
        if Duration::try_from_secs_f32(self.proximity.transition_secs).is_err() {
            return Err(ConfigError::invalid(
                "proximity.transition_secs",
                "must be a non-negative, representable number of seconds",
            ));
        }

        if self.touch.fade_millis == 0 {
            return Err(ConfigError::invalid("touch.fade_millis", "must be positive"));
        }

        if !(self.cursor.size.is_finite() && self.cursor.size > 0.) {
            return Err(ConfigError::invalid("cursor.size", "must be positive"));
        }
        if !(self.cursor.ring_width.is_finite() && self.cursor.ring_width >= 0.) {
            return Err(ConfigError::invalid("cursor.ring_width", "must not be negative"));
        }

        for (i, style) in self.spotlights.iter().enumerate() {
            if self.spotlights[..i].iter().any(|s| s.trigger == style.trigger) {
                return Err(ConfigError::invalid(
                    "spotlights",
                    format!("more than one spotlight triggered by {} theme", style.trigger),
                ));
            }
            if !(style.radius.is_finite() && style.radius > 0.) {
                return Err(ConfigError::invalid("spotlights.radius", "must be positive"));
            }
            if !(style.fade_stop > 0. && style.fade_stop <= 1.) {
                return Err(ConfigError::invalid(
                    "spotlights.fade_stop",
                    "must be in (0, 1]",
                ));
            }
        }

        Ok(())
    }

    /// Spotlight configured for the given theme, if any.
    pub fn spotlight_for(&self, theme: Theme) -> Option<&SpotlightStyle> {
        self.spotlights.iter().find(|s| s.trigger == theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SettingsEffects::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.proximity.radius, 76.);
        assert_eq!(settings.touch.fade(), Duration::from_millis(1000));
        assert_eq!(settings.proximity.transition(), Duration::from_millis(750));
        assert_eq!(settings.section.detection_line, 100.);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = SettingsEffects::from_json(r#"{"proximity":{"radius":50.0}}"#).unwrap();
        assert_eq!(settings.proximity.radius, 50.);
        assert_eq!(settings.proximity.max_boost, 0.1);
        assert_eq!(settings.section, SettingsSection::default());
        assert_eq!(settings.spotlights.len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        let err = SettingsEffects::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let err = SettingsEffects::from_json(r#"{"proximity":{"radius":0.0}}"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "proximity.radius"),
            ConfigError::Parse(e) => panic!("unexpected parse error: {e}"),
        }
    }

    #[test]
    fn test_rejects_unrepresentable_transition() {
        let err =
            SettingsEffects::from_json(r#"{"proximity":{"transition_secs":1e20}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "proximity.transition_secs",
                ..
            }
        ));
        assert!(SettingsEffects::from_json(r#"{"proximity":{"transition_secs":-0.5}}"#).is_err());

        // unvalidated settings still produce a usable transition
        let proximity = SettingsProximity {
            transition_secs: 1e20,
            ..SettingsProximity::default()
        };
        assert_eq!(proximity.transition(), Duration::ZERO);
    }

    #[test]
    fn test_rejects_duplicate_trigger() {
        let mut settings = SettingsEffects::default();
        settings.spotlights.push(SpotlightStyle::dark());
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "spotlights", .. }));
    }

    #[test]
    fn test_rejects_duplicate_section() {
        let mut settings = SettingsEffects::default();
        settings.section.order.push(SectionId::Home);
        assert!(settings.validate().is_err());

        settings.section.order.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_json_contract() {
        let settings = SettingsEffects::default();
        let json = settings.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["section"]["order"][0], "home");
        assert_eq!(value["spotlights"][0]["trigger"], "dark");
        assert_eq!(value["spotlights"][1]["trigger"], "light");
        assert_eq!(value["touch"]["fade_millis"], 1000);

        let back = SettingsEffects::from_json(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::invalid("cursor.size", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid value for `cursor.size`: must be positive"
        );
    }
}
