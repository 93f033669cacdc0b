use crate::app::config::{SettingsPatch, SettingsState};
use crate::app::inputs::gesture::Gesture;
use crate::app::state::zoom::ZoomState;
use crate::host::NodeId;
use crate::i18n::Language;
use crate::screen::ScreenId;
use crate::transition::TransitionJob;
use serde::Serialize;

/// Everything the lens event loop consumes, in arrival order.
#[derive(Debug)]
pub enum LensEvent {
    /// `origin` is the screen that was current when the swipe was sent.
    Swipe { gesture: Gesture, origin: ScreenId },
    Tap(NodeId),
    TransitionFinished(TransitionJob),
    SettingsLoaded(SettingsPatch),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SettingsChange {
    Language(Language),
    Accessibility(bool),
    LyricsVisible(bool),
    /// The persisted blob was merged in at startup.
    Loaded(SettingsState),
}

/// What the core tells the UI layer 📣
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    ScreenLeft { screen: ScreenId },
    ScreenEntered { screen: ScreenId },
    SettingsChanged { change: SettingsChange },
    CaptionChanged { text: String },
    ZoomChanged { zoom: ZoomState },
    LyricsFinished,
    MainStarted,
}
