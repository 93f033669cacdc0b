use crate::app::tasks::LoopHandle;
use tracing::{debug, info};

/// Zoom and caption loops of the Main screen. Started at most once.
#[derive(Debug, Default)]
pub struct MainExperience {
    zoom: Option<LoopHandle>,
    lyrics: Option<LoopHandle>,
}

impl MainExperience {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.zoom.is_some()
    }

    /// Run `launch` unless the loops already exist. Returns whether it ran.
    pub fn start_with<F>(&mut self, launch: F) -> bool
    where
        F: FnOnce() -> (LoopHandle, LoopHandle),
    {
        if self.is_started() {
            debug!("main experience already running");
            return false;
        }
        let (zoom, lyrics) = launch();
        self.zoom = Some(zoom);
        self.lyrics = Some(lyrics);
        info!("main experience started");
        true
    }

    pub fn stop(&mut self) {
        if let Some(zoom) = self.zoom.take() {
            zoom.stop();
        }
        if let Some(lyrics) = self.lyrics.take() {
            lyrics.stop();
        }
    }

    pub fn zoom_running(&self) -> bool {
        self.zoom.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn lyrics_running(&self) -> bool {
        self.lyrics.as_ref().is_some_and(|h| !h.is_finished())
    }
}
