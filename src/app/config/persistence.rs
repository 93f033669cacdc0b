use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Store key the settings blob lives under.
pub const SETTINGS_KEY: &str = "userSettings";

/// Session preferences, persisted as a flat JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    pub language: Language,
    pub dyslexia_mode: bool,
    pub show_lyrics: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            language: Language::English,
            dyslexia_mode: false,
            show_lyrics: true,
        }
    }
}

impl SettingsState {
    pub fn to_blob(&self) -> String {
        // Three plain fields; serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Fields recovered from a persisted blob. Absent, mistyped or unknown
/// values stay `None` so the defaults underneath survive the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsPatch {
    pub language: Option<Language>,
    pub dyslexia_mode: Option<bool>,
    pub show_lyrics: Option<bool>,
}

impl SettingsPatch {
    pub fn from_blob(blob: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(blob)?;
        let Some(map) = value.as_object() else {
            debug!("settings blob is not an object, ignoring");
            return Ok(Self::default());
        };

        let language = match map.get("language") {
            Some(Value::String(name)) => {
                let lang = Language::from_name(name);
                if lang.is_none() {
                    debug!(language = %name, "unknown persisted language, keeping default");
                }
                lang
            }
            _ => None,
        };

        Ok(Self {
            language,
            dyslexia_mode: map.get("dyslexiaMode").and_then(Value::as_bool),
            show_lyrics: map.get("showLyrics").and_then(Value::as_bool),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.dyslexia_mode.is_none() && self.show_lyrics.is_none()
    }

    /// Overlay the present fields, leaving the rest untouched.
    pub fn apply_to(&self, state: &mut SettingsState) {
        if let Some(language) = self.language {
            state.language = language;
        }
        if let Some(dyslexia) = self.dyslexia_mode {
            state.dyslexia_mode = dyslexia;
        }
        if let Some(show) = self.show_lyrics {
            state.show_lyrics = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_blob_keeps_defaults() {
        let patch = SettingsPatch::from_blob(r#"{"language":"Français"}"#).unwrap();
        let mut state = SettingsState::default();
        patch.apply_to(&mut state);

        assert_eq!(
            state,
            SettingsState {
                language: Language::French,
                dyslexia_mode: false,
                show_lyrics: true,
            }
        );
    }

    #[test]
    fn test_unknown_and_mistyped_fields_are_ignored() {
        let patch = SettingsPatch::from_blob(
            r#"{"language":"Klingon","dyslexiaMode":"yes","showLyrics":false,"theme":"dark"}"#,
        )
        .unwrap();
        assert_eq!(patch.language, None);
        assert_eq!(patch.dyslexia_mode, None);
        assert_eq!(patch.show_lyrics, Some(false));
    }

    #[test]
    fn test_non_object_blob_is_empty_patch() {
        assert!(SettingsPatch::from_blob("[1,2]").unwrap().is_empty());
        assert!(SettingsPatch::from_blob("not json").is_err());
    }

    #[test]
    fn test_blob_uses_persisted_field_names() {
        let blob = SettingsState::default().to_blob();
        assert_eq!(
            blob,
            r#"{"language":"English","dyslexiaMode":false,"showLyrics":true}"#
        );
    }
}
