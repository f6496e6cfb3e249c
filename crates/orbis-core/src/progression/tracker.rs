//! Caller-owned XP progress tracking.
//!
//! `ProgressTracker` mirrors how the surrounding application consumes the
//! leveling engine: it holds the running XP total the caller hydrated from
//! its own store, applies evaluated outcomes to it, and reports the level
//! transitions that follow. Persisting the total stays with the caller.

use chrono::Utc;
use log::debug;

use super::curve::{sanitize_xp, LevelCurve, LevelProgress};
use crate::events::Event;
use crate::focus::FocusOutcome;

/// Running XP total plus the outcome history behind it.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    curve: LevelCurve,
    total_xp: f64,
    history: Vec<FocusOutcome>,
}

impl ProgressTracker {
    /// Create a tracker on the default curve with a zero total.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curve(curve: LevelCurve) -> Self {
        Self {
            curve,
            total_xp: 0.0,
            history: Vec::new(),
        }
    }

    /// Seed the running total from the caller's store.
    pub fn hydrate(&mut self, total_xp: f64) {
        self.total_xp = sanitize_xp(total_xp);
    }

    pub fn total_xp(&self) -> f64 {
        self.total_xp
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// Resolve the current total into level and progress.
    pub fn progress(&self) -> LevelProgress {
        self.curve.resolve(self.total_xp)
    }

    pub fn history(&self) -> &[FocusOutcome] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Apply an evaluated outcome to the running total.
    ///
    /// Records the outcome in the history and returns the events the
    /// application should fan out: an `XpApplied` for every call, plus a
    /// `LevelChanged` when the delta crossed a level boundary.
    pub fn apply_outcome(&mut self, outcome: &FocusOutcome) -> Vec<Event> {
        self.history.push(outcome.clone());
        self.apply_delta(outcome.xp_delta)
    }

    /// Apply a bare XP delta. Penalties never take the total below zero.
    pub fn apply_delta(&mut self, delta: i64) -> Vec<Event> {
        let before = self.progress();
        let previous_total = self.total_xp;
        self.total_xp = (self.total_xp + delta as f64).max(0.0);

        let mut events = vec![Event::XpApplied {
            previous_total,
            new_total: self.total_xp,
            delta,
            at: Utc::now(),
        }];

        let after = self.progress();
        if after.level != before.level {
            debug!("level changed {} -> {}", before.level, after.level);
            events.push(Event::LevelChanged {
                from: before.level,
                to: after.level,
                at: Utc::now(),
            });
        }
        events
    }
}
