use crate::screen::{Direction, ScreenId};
use tracing::debug;

/// A swipe direction plus the screen that was current when it was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationIntent {
    pub direction: Direction,
    pub origin: ScreenId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// A transition is still animating.
    InFlight,
    /// The table has no entry for this direction.
    NoRoute,
    /// The intent was captured on a screen that is no longer current.
    StaleOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Start { from: ScreenId, to: ScreenId },
    Dropped(DropReason),
}

/// Owns the current screen. Navigation is two-phase: a request reserves the
/// target, and the screen only changes once the transition completes.
#[derive(Debug, Default)]
pub struct Navigator {
    current: ScreenId,
    pending: Option<ScreenId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn pending(&self) -> Option<ScreenId> {
        self.pending
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Swipe-driven navigation: only a direction, resolved through the table.
    pub fn request(&mut self, intent: NavigationIntent) -> NavOutcome {
        if let Some(reason) = self.check(intent.origin) {
            return Self::dropped(reason, intent.origin, None);
        }
        match self.current.neighbor(intent.direction) {
            Some(target) => self.reserve(target),
            None => Self::dropped(DropReason::NoRoute, intent.origin, None),
        }
    }

    /// Tap-driven navigation names its destination explicitly.
    pub fn request_direct(&mut self, from: ScreenId, to: ScreenId) -> NavOutcome {
        if let Some(reason) = self.check(from) {
            return Self::dropped(reason, from, Some(to));
        }
        if from == to {
            return Self::dropped(DropReason::NoRoute, from, Some(to));
        }
        self.reserve(to)
    }

    /// The transition finished: returns (left, entered).
    pub fn complete(&mut self) -> Option<(ScreenId, ScreenId)> {
        let target = self.pending.take()?;
        let left = self.current;
        self.current = target;
        Some((left, target))
    }

    /// Release a reservation whose transition never started.
    pub fn abort(&mut self) {
        self.pending = None;
    }

    fn check(&self, origin: ScreenId) -> Option<DropReason> {
        if self.in_flight() {
            Some(DropReason::InFlight)
        } else if origin != self.current {
            Some(DropReason::StaleOrigin)
        } else {
            None
        }
    }

    fn reserve(&mut self, target: ScreenId) -> NavOutcome {
        self.pending = Some(target);
        NavOutcome::Start {
            from: self.current,
            to: target,
        }
    }

    fn dropped(reason: DropReason, origin: ScreenId, to: Option<ScreenId>) -> NavOutcome {
        debug!(?reason, ?origin, ?to, "navigation dropped");
        NavOutcome::Dropped(reason)
    }
}
