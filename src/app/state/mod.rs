pub mod lyrics;
pub mod navigation;
pub mod settings;
pub mod zoom;

pub use lyrics::LyricsTrack;
pub use navigation::{DropReason, NavOutcome, NavigationIntent, Navigator};
pub use settings::SettingsStore;
pub use zoom::{ZoomController, ZoomState};
