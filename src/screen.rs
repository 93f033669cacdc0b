//! Screens, their layout slots, the navigation table and the typed
//! registry of host nodes resolved at startup.

use crate::error::{LensError, LensResult};
use crate::host::{NodeId, Scene};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};

pub const LYRICS_CONTAINER: &str = "lyrics-container";

/// Every node the lens needs from the host. Missing any of them is fatal.
pub const REQUIRED_NODES: &[&str] = &[
    "opening-screen",
    "settings-screen",
    "main-screen",
    LYRICS_CONTAINER,
    "start-button",
    "begin-button",
    "english-button",
    "spanish-button",
    "french-button",
    "dyslexia-toggle",
    "lyrics-toggle",
];

/// Top-level views of the lens 📱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScreenId {
    #[default]
    Opening,
    Settings,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl ScreenId {
    pub const ALL: [ScreenId; 3] = [ScreenId::Opening, ScreenId::Settings, ScreenId::Main];

    /// Horizontal layout position; x = slot * viewport width.
    pub fn slot(&self) -> u32 {
        match self {
            ScreenId::Opening => 0,
            ScreenId::Settings => 1,
            ScreenId::Main => 2,
        }
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            ScreenId::Opening => "opening-screen",
            ScreenId::Settings => "settings-screen",
            ScreenId::Main => "main-screen",
        }
    }

    /// Navigation table. Linear topology, only adjacent slots connect.
    pub fn neighbor(&self, direction: Direction) -> Option<ScreenId> {
        match (self, direction) {
            (ScreenId::Opening, Direction::Left) => Some(ScreenId::Settings),
            (ScreenId::Opening, Direction::Right) => None,
            (ScreenId::Settings, Direction::Left) => Some(ScreenId::Main),
            (ScreenId::Settings, Direction::Right) => Some(ScreenId::Opening),
            (ScreenId::Main, Direction::Left) => None,
            (ScreenId::Main, Direction::Right) => Some(ScreenId::Settings),
        }
    }

    fn index(&self) -> usize {
        self.slot() as usize
    }
}

/// Tappable buttons and toggles 🔘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Start,
    Begin,
    Language(Language),
    DyslexiaToggle,
    LyricsToggle,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Start,
        Control::Begin,
        Control::Language(Language::English),
        Control::Language(Language::Spanish),
        Control::Language(Language::French),
        Control::DyslexiaToggle,
        Control::LyricsToggle,
    ];

    pub fn node_name(&self) -> &'static str {
        match self {
            Control::Start => "start-button",
            Control::Begin => "begin-button",
            Control::Language(Language::English) => "english-button",
            Control::Language(Language::Spanish) => "spanish-button",
            Control::Language(Language::French) => "french-button",
            Control::DyslexiaToggle => "dyslexia-toggle",
            Control::LyricsToggle => "lyrics-toggle",
        }
    }
}

/// Typed mapping from screens and controls to host handles.
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    screens: [NodeId; 3],
    lyrics_container: NodeId,
    controls: Vec<(Control, NodeId)>,
    viewport_width: f32,
}

fn require(scene: &dyn Scene, name: &'static str) -> LensResult<NodeId> {
    scene
        .find_first(name)
        .ok_or(LensError::MissingNode { name })
}

impl ScreenRegistry {
    /// Resolve every required node. `fallback_width` is used when the host
    /// cannot report its viewport width.
    pub fn resolve(scene: &dyn Scene, fallback_width: f32) -> LensResult<Self> {
        let screens = [
            require(scene, ScreenId::Opening.node_name())?,
            require(scene, ScreenId::Settings.node_name())?,
            require(scene, ScreenId::Main.node_name())?,
        ];
        let lyrics_container = require(scene, LYRICS_CONTAINER)?;
        let controls = Control::ALL
            .iter()
            .map(|c| require(scene, c.node_name()).map(|id| (*c, id)))
            .collect::<LensResult<Vec<_>>>()?;

        let viewport_width = scene
            .viewport_width()
            .filter(|w| *w > 0.0)
            .unwrap_or(fallback_width);

        Ok(Self {
            screens,
            lyrics_container,
            controls,
            viewport_width,
        })
    }

    pub fn handle(&self, screen: ScreenId) -> NodeId {
        self.screens[screen.index()]
    }

    pub fn lyrics_container(&self) -> NodeId {
        self.lyrics_container
    }

    pub fn control_for(&self, node: NodeId) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, id)| *id == node)
            .map(|(c, _)| *c)
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Rest position of a screen when the view offset is zero.
    pub fn home_x(&self, screen: ScreenId) -> f32 {
        screen.slot() as f32 * self.viewport_width
    }

    /// Lay every screen out on its slot.
    pub fn reset_positions(&self, scene: &dyn Scene) {
        for screen in ScreenId::ALL {
            scene.set_transform_x(self.handle(screen), self.home_x(screen));
        }
    }
}
