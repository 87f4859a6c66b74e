//! User-facing app settings (voice and theme).
//!
//! Stored as a flat camelCase JSON object, e.g.
//! `{"voiceRate":0.9,"voicePitch":1.0,"theme":"system"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Whether dark styling applies, given the OS preference.
    pub fn resolve(&self, system_prefers_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_prefers_dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub voice_rate: f64,
    pub voice_pitch: f64,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            voice_rate: 0.9,
            voice_pitch: 1.0,
            theme: Theme::System,
        }
    }
}

/// A single-field settings change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    VoiceRate(f64),
    VoicePitch(f64),
    Theme(Theme),
}

impl AppSettings {
    /// Parse a stored value, filling missing fields from defaults.
    /// Anything unparseable yields the defaults.
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring malformed stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::VoiceRate(rate) => self.voice_rate = rate,
            SettingUpdate::VoicePitch(pitch) => self.voice_pitch = pitch,
            SettingUpdate::Theme(theme) => self.theme = theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.voice_rate, 0.9);
        assert_eq!(settings.voice_pitch, 1.0);
        assert_eq!(settings.theme, Theme::System);
    }

    #[test]
    fn stored_fields_merge_over_defaults() {
        let settings = AppSettings::from_stored(r#"{"theme":"dark"}"#);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.voice_rate, 0.9);
    }

    #[test]
    fn malformed_stored_value_yields_defaults() {
        assert_eq!(AppSettings::from_stored("{not json"), AppSettings::default());
        assert_eq!(
            AppSettings::from_stored(r#"{"theme":"sepia"}"#),
            AppSettings::default()
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = AppSettings::default().to_stored();
        assert!(json.contains("\"voiceRate\":0.9"));
        assert!(json.contains("\"voicePitch\":1.0"));
        assert!(json.contains("\"theme\":\"system\""));
    }

    #[test]
    fn apply_updates_one_field() {
        let mut settings = AppSettings::default();
        settings.apply(SettingUpdate::VoicePitch(1.4));
        assert_eq!(settings.voice_pitch, 1.4);
        assert_eq!(settings.voice_rate, 0.9);
    }

    #[test]
    fn theme_resolution() {
        assert!(!Theme::Light.resolve(true));
        assert!(Theme::Dark.resolve(false));
        assert!(Theme::System.resolve(true));
        assert!(!Theme::System.resolve(false));
    }
}
