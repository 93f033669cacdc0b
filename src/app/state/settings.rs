use crate::app::config::{SettingsPatch, SettingsState, SETTINGS_KEY};
use crate::app::events::{Notification, SettingsChange};
use crate::host::KeyValueStore;
use crate::i18n::Language;
use crate::ui::UiSync;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Owner of the session settings. Every mutation is projected onto the UI
/// right away, published to subscribers and persisted.
pub struct SettingsStore {
    state: SettingsState,
    sync: UiSync,
    store: Arc<dyn KeyValueStore>,
    snapshot: watch::Sender<SettingsState>,
    notify: broadcast::Sender<Notification>,
    loaded: bool,
}

impl SettingsStore {
    /// Starts from defaults and projects them, so the UI is consistent
    /// before the persisted blob arrives.
    pub fn new(
        sync: UiSync,
        store: Arc<dyn KeyValueStore>,
        notify: broadcast::Sender<Notification>,
    ) -> Self {
        let state = SettingsState::default();
        sync.apply_all(&state);
        let (snapshot, _) = watch::channel(state);
        Self {
            state,
            sync,
            store,
            snapshot,
            notify,
            loaded: false,
        }
    }

    pub fn state(&self) -> SettingsState {
        self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.snapshot.subscribe()
    }

    /// Read the persisted blob off the event loop. Failures and empty
    /// results come back as an empty patch.
    pub async fn fetch(store: Arc<dyn KeyValueStore>) -> SettingsPatch {
        let result = tokio::task::spawn_blocking(move || store.get(SETTINGS_KEY)).await;
        match result {
            Ok(Ok(Some(blob))) => match SettingsPatch::from_blob(&blob) {
                Ok(patch) => patch,
                Err(e) => {
                    warn!(error = %e, "persisted settings unreadable, using defaults");
                    SettingsPatch::default()
                }
            },
            Ok(Ok(None)) => {
                debug!("no persisted settings");
                SettingsPatch::default()
            }
            Ok(Err(e)) => {
                warn!(error = %e, "settings load failed, using defaults");
                SettingsPatch::default()
            }
            Err(e) => {
                warn!(error = %e, "settings load task failed, using defaults");
                SettingsPatch::default()
            }
        }
    }

    /// One-time merge of the persisted fields over the current state.
    /// Returns false when already merged or when there is nothing to merge.
    pub fn merge_loaded(&mut self, patch: SettingsPatch) -> bool {
        if self.loaded {
            debug!("settings already loaded, ignoring second merge");
            return false;
        }
        self.loaded = true;
        if patch.is_empty() {
            return false;
        }

        patch.apply_to(&mut self.state);
        info!(language = %self.state.language, dyslexia = self.state.dyslexia_mode,
            lyrics = self.state.show_lyrics, "settings loaded");
        self.sync.apply_all(&self.state);
        self.publish(SettingsChange::Loaded(self.state));
        true
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
        self.sync.apply_language(language);
        self.commit(SettingsChange::Language(language));
    }

    pub fn set_accessibility(&mut self, dyslexia_mode: bool) {
        self.state.dyslexia_mode = dyslexia_mode;
        self.sync.apply_accessibility(dyslexia_mode);
        self.commit(SettingsChange::Accessibility(dyslexia_mode));
    }

    pub fn set_lyrics_visible(&mut self, show_lyrics: bool) {
        self.state.show_lyrics = show_lyrics;
        self.sync.apply_lyrics_visibility(show_lyrics);
        self.commit(SettingsChange::LyricsVisible(show_lyrics));
    }

    pub fn toggle_accessibility(&mut self) {
        self.set_accessibility(!self.state.dyslexia_mode);
    }

    pub fn toggle_lyrics_visible(&mut self) {
        self.set_lyrics_visible(!self.state.show_lyrics);
    }

    fn commit(&mut self, change: SettingsChange) {
        self.publish(change);
        self.save();
    }

    fn publish(&self, change: SettingsChange) {
        self.snapshot.send_replace(self.state);
        // No subscribers is fine
        let _ = self.notify.send(Notification::SettingsChanged { change });
    }

    fn save(&self) {
        if let Err(e) = self.store.set(SETTINGS_KEY, &self.state.to_blob()) {
            warn!(error = %e, "failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessScene, Material, MemoryStore, RecordingStrings};
    use crate::screen::ScreenRegistry;

    struct Fixture {
        scene: Arc<HeadlessScene>,
        strings: Arc<RecordingStrings>,
        store: Arc<MemoryStore>,
        settings: SettingsStore,
        notes: broadcast::Receiver<Notification>,
    }

    fn fixture(store: MemoryStore) -> Fixture {
        let scene = Arc::new(HeadlessScene::with_lens_nodes(390.0));
        let strings = Arc::new(RecordingStrings::new());
        let store = Arc::new(store);
        let registry = ScreenRegistry::resolve(scene.as_ref(), 390.0).unwrap();
        let sync = UiSync::new(scene.clone(), strings.clone(), &registry);
        let (notify, notes) = broadcast::channel(16);
        let settings = SettingsStore::new(sync, store.clone(), notify);
        Fixture {
            scene,
            strings,
            store,
            settings,
            notes,
        }
    }

    #[test]
    fn test_defaults_projected_on_creation() {
        let f = fixture(MemoryStore::new());
        assert_eq!(f.strings.get("startButtonText").as_deref(), Some("Get Started"));
        assert!(!f.scene.node("lyrics-container").unwrap().hidden);
        assert_eq!(
            f.scene.node("main-screen").unwrap().material,
            Some(Material::RegularFont)
        );
    }

    #[test]
    fn test_set_language_relabels_saves_and_notifies() {
        let mut f = fixture(MemoryStore::new());
        f.settings.set_language(Language::French);

        assert_eq!(f.strings.get("beginButtonText").as_deref(), Some("Démarrer l'expérience"));
        let blob = f.store.get(SETTINGS_KEY).unwrap().unwrap();
        assert!(blob.contains("Français"));
        assert_eq!(
            f.notes.try_recv().unwrap(),
            Notification::SettingsChanged {
                change: SettingsChange::Language(Language::French)
            }
        );
    }

    #[test]
    fn test_toggles_flip_one_field_each() {
        let mut f = fixture(MemoryStore::new());
        f.settings.toggle_accessibility();
        assert!(f.settings.state().dyslexia_mode);
        assert!(f.settings.state().show_lyrics);

        f.settings.toggle_lyrics_visible();
        assert!(!f.settings.state().show_lyrics);
        assert!(f.scene.node("lyrics-container").unwrap().hidden);
        assert_eq!(f.settings.state().language, Language::English);
    }

    #[test]
    fn test_watch_snapshot_tracks_state() {
        let mut f = fixture(MemoryStore::new());
        let rx = f.settings.subscribe();
        f.settings.set_lyrics_visible(false);
        assert!(!rx.borrow().show_lyrics);
    }

    #[test]
    fn test_merge_is_one_time() {
        let mut f = fixture(MemoryStore::new());
        let patch = SettingsPatch::from_blob(r#"{"language":"Français"}"#).unwrap();
        assert!(f.settings.merge_loaded(patch));
        assert_eq!(
            f.settings.state(),
            SettingsState {
                language: Language::French,
                dyslexia_mode: false,
                show_lyrics: true,
            }
        );
        assert_eq!(f.strings.get("titleText").as_deref(), Some("RA Adaptative pour Concerts"));

        let again = SettingsPatch::from_blob(r#"{"language":"English"}"#).unwrap();
        assert!(!f.settings.merge_loaded(again));
        assert_eq!(f.settings.state().language, Language::French);
    }

    #[tokio::test]
    async fn test_fetch_recovers_from_bad_blob() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entry(SETTINGS_KEY, "{broken"));
        assert!(SettingsStore::fetch(store).await.is_empty());

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        assert!(SettingsStore::fetch(store).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_reads_persisted_fields() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry(
            SETTINGS_KEY,
            r#"{"dyslexiaMode":true}"#,
        ));
        let patch = SettingsStore::fetch(store).await;
        assert_eq!(patch.dyslexia_mode, Some(true));
        assert_eq!(patch.language, None);
    }
}
