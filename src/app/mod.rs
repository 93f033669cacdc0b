//! The lens controller: a single event loop that owns the navigation
//! state, the transition engine, the settings and the main experience.

pub mod cli;
pub mod config;
pub mod events;
pub mod experience;
pub mod inputs;
pub mod lyrics;
pub mod state;
pub mod tasks;

use crate::error::LensResult;
use crate::host::HostBindings;
use crate::screen::{ScreenId, ScreenRegistry};
use crate::transition::{TransitionEngine, TransitionJob};
use crate::ui::UiSync;
use config::{LensConfig, SettingsState};
use events::{LensEvent, Notification};
use experience::MainExperience;
use inputs::gesture::GestureInterpreter;
use lyrics::LyricCue;
use state::{LyricsTrack, NavOutcome, Navigator, SettingsStore, ZoomController, ZoomState};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct Lens {
    config: LensConfig,
    hosts: HostBindings,
    pub(crate) registry: ScreenRegistry,
    pub(crate) navigator: Navigator,
    pub(crate) gestures: GestureInterpreter,
    pub(crate) settings: SettingsStore,
    engine: TransitionEngine,
    experience: MainExperience,
    cues: Vec<LyricCue>,
    tx: mpsc::Sender<LensEvent>,
    notify: broadcast::Sender<Notification>,
    zoom: watch::Sender<ZoomState>,
    caption: watch::Sender<Option<String>>,
    screen: watch::Sender<ScreenId>,
    is_running: bool,
}

impl Lens {
    /// Resolve the host nodes and lay the screens out. Fails when a required
    /// node is missing; nothing is wired in that case.
    pub fn new(
        config: LensConfig,
        hosts: HostBindings,
        cues: Vec<LyricCue>,
        tx: mpsc::Sender<LensEvent>,
    ) -> LensResult<Self> {
        config.validate()?;

        let scene = hosts.scene.clone();
        let registry = ScreenRegistry::resolve(scene.as_ref(), config.transition.viewport_width)?;
        registry.reset_positions(scene.as_ref());

        let (notify, _) = broadcast::channel(64);
        let sync = UiSync::new(scene.clone(), hosts.strings.clone(), &registry);
        let settings = SettingsStore::new(sync, hosts.store.clone(), notify.clone());

        let engine = TransitionEngine::new(
            scene,
            registry.clone(),
            Duration::from_millis(config.transition.duration_ms),
            Duration::from_millis(config.transition.frame_interval_ms),
        );

        let initial_zoom = ZoomController::new(&config.camera, &config.detection).state();
        let (zoom, _) = watch::channel(initial_zoom);
        let (caption, _) = watch::channel(None);
        let (screen, _) = watch::channel(ScreenId::Opening);

        info!(
            width = registry.viewport_width(),
            cues = cues.len(),
            "lens initialized"
        );

        Ok(Self {
            gestures: GestureInterpreter::new(&config.gesture),
            config,
            hosts,
            registry,
            navigator: Navigator::new(),
            settings,
            engine,
            experience: MainExperience::new(),
            cues,
            tx,
            notify,
            zoom,
            caption,
            screen,
            is_running: true,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify.subscribe()
    }

    pub fn watch_zoom(&self) -> watch::Receiver<ZoomState> {
        self.zoom.subscribe()
    }

    pub fn watch_caption(&self) -> watch::Receiver<Option<String>> {
        self.caption.subscribe()
    }

    pub fn watch_settings(&self) -> watch::Receiver<SettingsState> {
        self.settings.subscribe()
    }

    /// Read-only view of the current screen for event producers. Swipes
    /// are stamped with this value when they are sent.
    pub fn watch_screen(&self) -> watch::Receiver<ScreenId> {
        self.screen.subscribe()
    }

    pub fn current_screen(&self) -> ScreenId {
        self.navigator.current()
    }

    pub fn settings(&self) -> SettingsState {
        self.settings.state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.engine.is_busy()
    }

    pub fn main_experience(&self) -> &MainExperience {
        &self.experience
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Fetch persisted settings in the background; the merge arrives as a
    /// `SettingsLoaded` event. Until then the defaults stay on screen.
    pub fn start_settings_load(&self) -> JoinHandle<()> {
        let store = self.hosts.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let patch = SettingsStore::fetch(store).await;
            let _ = tx.send(LensEvent::SettingsLoaded(patch)).await;
        })
    }

    pub fn handle_event(&mut self, event: LensEvent) {
        match event {
            LensEvent::Swipe { gesture, origin } => inputs::handle_swipe(self, gesture, origin),
            LensEvent::Tap(node) => inputs::handle_tap(self, node),
            LensEvent::TransitionFinished(job) => self.on_transition_finished(job),
            LensEvent::SettingsLoaded(patch) => {
                self.settings.merge_loaded(patch);
            }
            LensEvent::Quit => self.shutdown(),
        }
    }

    /// Process events in arrival order until `Quit` or every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<LensEvent>) {
        while self.is_running {
            match rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        self.shutdown();
    }

    pub fn shutdown(&mut self) {
        if self.is_running {
            info!("lens shutting down");
        }
        self.experience.stop();
        self.is_running = false;
    }

    /// Hand an accepted navigation to the transition engine.
    pub(crate) fn navigate(&mut self, outcome: NavOutcome) {
        let NavOutcome::Start { from, to } = outcome else {
            return;
        };
        let tx = self.tx.clone();
        let started = self.engine.animate(from, to, move |job| async move {
            let _ = tx.send(LensEvent::TransitionFinished(job)).await;
        });
        if let Err(e) = started {
            warn!(error = %e, ?from, ?to, "transition refused");
            self.navigator.abort();
        }
    }

    fn on_transition_finished(&mut self, job: TransitionJob) {
        if !self.engine.finish(job.id) {
            debug!(job = job.id.0, "completion for an unknown job");
            return;
        }
        let Some((left, entered)) = self.navigator.complete() else {
            return;
        };

        info!(?left, ?entered, "screen entered");
        self.screen.send_replace(entered);
        let _ = self.notify.send(Notification::ScreenLeft { screen: left });
        let _ = self.notify.send(Notification::ScreenEntered { screen: entered });

        if entered == ScreenId::Main {
            self.enter_main();
        }
    }

    /// Start the zoom and caption loops. Re-entering Main leaves running
    /// loops alone.
    pub(crate) fn enter_main(&mut self) {
        let config = &self.config;
        let hosts = &self.hosts;
        let cues = &self.cues;
        let zoom = &self.zoom;
        let caption = &self.caption;
        let notify = &self.notify;

        let started = self.experience.start_with(|| {
            let zoom_loop = tasks::spawn_zoom_loop(
                ZoomController::new(&config.camera, &config.detection),
                hosts.detector.clone(),
                hosts.camera.clone(),
                Duration::from_millis(config.detection.update_interval_ms),
                zoom.clone(),
                notify.clone(),
            );
            let lyrics_loop = tasks::spawn_lyrics_loop(
                LyricsTrack::new(cues.clone()),
                hosts.strings.clone(),
                caption.clone(),
                notify.clone(),
            );
            (zoom_loop, lyrics_loop)
        });

        if started {
            let _ = self.notify.send(Notification::MainStarted);
        }
    }
}
