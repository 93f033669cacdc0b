//! Background loops of the main experience: performer zoom and captions.

use crate::app::events::Notification;
use crate::app::state::lyrics::LyricsTrack;
use crate::app::state::zoom::{ZoomController, ZoomState};
use crate::host::{Camera, PerformerDetector, StringSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// String patch the current caption is pushed to.
pub const CAPTION_KEY: &str = "lyricsText";

/// Owns a spawned loop. Stopping (or dropping) the handle aborts it.
#[derive(Debug)]
pub struct LoopHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl LoopHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(&self) {
        if !self.task.is_finished() {
            debug!(loop_name = self.name, "stopping loop");
            self.task.abort();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Poll the detector every `period` and drive the camera FOV.
pub fn spawn_zoom_loop(
    mut controller: ZoomController,
    detector: Arc<dyn PerformerDetector>,
    camera: Arc<dyn Camera>,
    period: Duration,
    snapshot: watch::Sender<ZoomState>,
    notify: broadcast::Sender<Notification>,
) -> LoopHandle {
    let task = tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            let detection = detector.detect();
            if let Some(zoom) = controller.apply(&detection) {
                camera.set_fov(zoom.fov);
                snapshot.send_replace(zoom);
                info!(zoom = zoom.current_zoom, fov = zoom.fov, "performer locked");
                let _ = notify.send(Notification::ZoomChanged { zoom });
            }
        }
    });
    LoopHandle { name: "zoom", task }
}

/// Publish each cue, wait out its duration, move on. Ends when the track
/// is exhausted. Hiding the lyrics does not pause the timer.
pub fn spawn_lyrics_loop(
    mut track: LyricsTrack,
    strings: Arc<dyn StringSink>,
    caption: watch::Sender<Option<String>>,
    notify: broadcast::Sender<Notification>,
) -> LoopHandle {
    let task = tokio::spawn(async move {
        while let Some(cue) = track.advance() {
            strings.set_string_value(CAPTION_KEY, &cue.text);
            caption.send_replace(Some(cue.text.clone()));
            debug!(cursor = track.cursor(), text = %cue.text, "caption");
            let _ = notify.send(Notification::CaptionChanged { text: cue.text.clone() });
            tokio::time::sleep(cue.duration()).await;
        }
        info!(cues = track.len(), "lyrics finished");
        let _ = notify.send(Notification::LyricsFinished);
    });
    LoopHandle { name: "lyrics", task }
}
