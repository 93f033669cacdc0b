//! Localization table. The single place translated UI strings live.

use serde::{Deserialize, Serialize};

/// Supported UI languages 🌐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "English")]
    English,
    #[serde(rename = "Español")]
    Spanish,
    #[serde(rename = "Français")]
    French,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Spanish, Language::French];

    /// Display name, also the persisted representation.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::French => "Français",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keys of every localized string pushed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    StartButton,
    BeginButton,
    DyslexiaMode,
    ShowLyrics,
    Title,
    Subtitle,
}

impl TextKey {
    pub const ALL: [TextKey; 6] = [
        TextKey::StartButton,
        TextKey::BeginButton,
        TextKey::DyslexiaMode,
        TextKey::ShowLyrics,
        TextKey::Title,
        TextKey::Subtitle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TextKey::StartButton => "startButton",
            TextKey::BeginButton => "beginButton",
            TextKey::DyslexiaMode => "dyslexiaMode",
            TextKey::ShowLyrics => "showLyrics",
            TextKey::Title => "title",
            TextKey::Subtitle => "subtitle",
        }
    }

    /// Name of the string patch the UI binds this text to.
    pub fn patch_key(&self) -> String {
        format!("{}Text", self.key())
    }
}

pub fn translate(language: Language, key: TextKey) -> &'static str {
    use Language::*;
    use TextKey::*;
    match (language, key) {
        (English, StartButton) => "Get Started",
        (English, BeginButton) => "Begin Experience",
        (English, DyslexiaMode) => "Dyslexia-friendly mode",
        (English, ShowLyrics) => "Show lyrics",
        (English, Title) => "Adaptive AR for Concerts",
        (English, Subtitle) => "Your concert, your way",

        (Spanish, StartButton) => "Comenzar",
        (Spanish, BeginButton) => "Iniciar Experiencia",
        (Spanish, DyslexiaMode) => "Modo para dislexia",
        (Spanish, ShowLyrics) => "Mostrar letra",
        (Spanish, Title) => "AR Adaptativo para Conciertos",
        (Spanish, Subtitle) => "Tu concierto, a tu manera",

        (French, StartButton) => "Commencer",
        (French, BeginButton) => "Démarrer l'expérience",
        (French, DyslexiaMode) => "Mode dyslexie",
        (French, ShowLyrics) => "Afficher paroles",
        (French, Title) => "RA Adaptative pour Concerts",
        (French, Subtitle) => "Votre concert, à votre façon",
    }
}
