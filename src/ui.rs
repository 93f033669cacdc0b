//! Projection of the settings onto the host UI: localized strings, the
//! accessibility font material and the lyrics container visibility.
//! Holds no state of its own.

use crate::app::config::SettingsState;
use crate::host::{Material, NodeId, Scene, StringSink};
use crate::i18n::{translate, Language, TextKey};
use crate::screen::{ScreenId, ScreenRegistry};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct UiSync {
    scene: Arc<dyn Scene>,
    strings: Arc<dyn StringSink>,
    main_screen: NodeId,
    lyrics_container: NodeId,
}

impl UiSync {
    pub fn new(
        scene: Arc<dyn Scene>,
        strings: Arc<dyn StringSink>,
        registry: &ScreenRegistry,
    ) -> Self {
        Self {
            scene,
            strings,
            main_screen: registry.handle(ScreenId::Main),
            lyrics_container: registry.lyrics_container(),
        }
    }

    pub fn apply_language(&self, language: Language) {
        for key in TextKey::ALL {
            self.strings
                .set_string_value(&key.patch_key(), translate(language, key));
        }
    }

    pub fn apply_accessibility(&self, dyslexia_mode: bool) {
        let material = if dyslexia_mode {
            Material::DyslexiaFont
        } else {
            Material::RegularFont
        };
        debug!(material = material.name(), "main screen material");
        self.scene.set_material(self.main_screen, material);
    }

    pub fn apply_lyrics_visibility(&self, show_lyrics: bool) {
        self.scene.set_hidden(self.lyrics_container, !show_lyrics);
    }

    pub fn apply_all(&self, state: &SettingsState) {
        self.apply_language(state.language);
        self.apply_accessibility(state.dyslexia_mode);
        self.apply_lyrics_visibility(state.show_lyrics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessScene, RecordingStrings};

    fn setup() -> (Arc<HeadlessScene>, Arc<RecordingStrings>, UiSync) {
        let scene = Arc::new(HeadlessScene::with_lens_nodes(390.0));
        let strings = Arc::new(RecordingStrings::new());
        let registry = ScreenRegistry::resolve(scene.as_ref(), 390.0).unwrap();
        let sync = UiSync::new(scene.clone(), strings.clone(), &registry);
        (scene, strings, sync)
    }

    #[test]
    fn test_language_pushes_every_string() {
        let (_, strings, sync) = setup();
        sync.apply_language(Language::Spanish);
        assert_eq!(strings.get("startButtonText").as_deref(), Some("Comenzar"));
        assert_eq!(strings.get("showLyricsText").as_deref(), Some("Mostrar letra"));
        assert_eq!(strings.write_count(), TextKey::ALL.len());
    }

    #[test]
    fn test_accessibility_swaps_main_material() {
        let (scene, _, sync) = setup();
        sync.apply_accessibility(true);
        assert_eq!(
            scene.node("main-screen").unwrap().material,
            Some(Material::DyslexiaFont)
        );
        sync.apply_accessibility(false);
        assert_eq!(
            scene.node("main-screen").unwrap().material,
            Some(Material::RegularFont)
        );
    }

    #[test]
    fn test_lyrics_visibility_hides_container() {
        let (scene, _, sync) = setup();
        sync.apply_lyrics_visibility(false);
        assert!(scene.node("lyrics-container").unwrap().hidden);
        sync.apply_lyrics_visibility(true);
        assert!(!scene.node("lyrics-container").unwrap().hidden);
    }
}
