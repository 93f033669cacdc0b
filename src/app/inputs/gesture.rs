use crate::app::config::{AxisPolicy, GestureConfig};
use crate::app::state::navigation::NavigationIntent;
use crate::screen::{Direction, ScreenId};
use serde::{Deserialize, Serialize};

/// 2-D swipe translation in normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

/// A pre-classified swipe from the host gesture source 👆
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gesture {
    pub translation: Translation,
}

impl Gesture {
    pub fn swipe(x: f32, y: f32) -> Self {
        Self {
            translation: Translation { x, y },
        }
    }
}

/// What one swipe asks for. Both parts may be set under the independent policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureIntents {
    pub navigation: Option<NavigationIntent>,
    pub toggle_lyrics: bool,
}

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    threshold: f32,
    policy: AxisPolicy,
}

impl GestureInterpreter {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            threshold: config.swipe_threshold,
            policy: config.axis_policy,
        }
    }

    /// `origin` is the screen the sender saw when the swipe was dispatched.
    /// It travels with the intent so a late swipe can be recognized as stale.
    pub fn interpret(&self, gesture: &Gesture, origin: ScreenId) -> GestureIntents {
        let Translation { x, y } = gesture.translation;

        let (test_x, test_y) = match self.policy {
            AxisPolicy::Independent => (true, true),
            AxisPolicy::Dominant => {
                let horizontal = x.abs() >= y.abs();
                (horizontal, !horizontal)
            }
        };

        let navigation = if test_x && x.abs() > self.threshold {
            let direction = if x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            };
            Some(NavigationIntent {
                direction,
                origin,
            })
        } else {
            None
        };

        GestureIntents {
            navigation,
            toggle_lyrics: test_y && y < 0.0,
        }
    }
}
