use crate::app::Lens;
use crate::host::NodeId;
use crate::screen::{Control, ScreenId};
use tracing::debug;

pub mod commands;
pub mod gesture;

use gesture::Gesture;

/// Swipes feed two independent subscribers: navigation (horizontal) and
/// the lyrics visibility toggle (downward).
pub fn handle_swipe(lens: &mut Lens, gesture: Gesture, origin: ScreenId) {
    let intents = lens.gestures.interpret(&gesture, origin);

    if let Some(intent) = intents.navigation {
        let outcome = lens.navigator.request(intent);
        lens.navigate(outcome);
    }

    if intents.toggle_lyrics {
        lens.settings.toggle_lyrics_visible();
    }
}

/// Taps name their destination directly and bypass the navigation table.
pub fn handle_tap(lens: &mut Lens, node: NodeId) {
    let Some(control) = lens.registry.control_for(node) else {
        debug!(?node, "tap on a node with no control");
        return;
    };

    match control {
        Control::Start => {
            let outcome = lens
                .navigator
                .request_direct(ScreenId::Opening, ScreenId::Settings);
            lens.navigate(outcome);
        }
        Control::Begin => {
            let outcome = lens
                .navigator
                .request_direct(ScreenId::Settings, ScreenId::Main);
            lens.navigate(outcome);
        }
        Control::Language(language) => lens.settings.set_language(language),
        Control::DyslexiaToggle => lens.settings.toggle_accessibility(),
        Control::LyricsToggle => lens.settings.toggle_lyrics_visible(),
    }
}
