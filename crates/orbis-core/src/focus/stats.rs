//! Session outcome aggregation.
//!
//! Rolls a slice of evaluated outcomes into the counters the dashboard
//! renders. Aggregation only; chart rendering stays with the caller.

use serde::{Deserialize, Serialize};

use super::evaluator::{FocusOutcome, FocusStatus};

/// Aggregate view over a set of evaluated sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub successes: usize,
    pub partials: usize,
    pub failures: usize,
    /// Sum of all XP deltas, penalties included.
    pub net_xp: i64,
    /// Successes over total sessions; 0.0 when empty.
    pub success_rate: f64,
    /// Consecutive successes at the end of the history.
    pub current_streak: usize,
    /// Longest run of consecutive successes.
    pub best_streak: usize,
}

impl SessionSummary {
    /// Aggregate a slice of outcomes, in chronological order.
    pub fn from_outcomes(outcomes: &[FocusOutcome]) -> Self {
        let mut summary = Self::default();
        let mut streak = 0;

        for outcome in outcomes {
            summary.net_xp += outcome.xp_delta;
            match outcome.status {
                FocusStatus::Success => {
                    summary.successes += 1;
                    streak += 1;
                    summary.best_streak = summary.best_streak.max(streak);
                }
                FocusStatus::Partial => {
                    summary.partials += 1;
                    streak = 0;
                }
                FocusStatus::Failure => {
                    summary.failures += 1;
                    streak = 0;
                }
            }
        }

        summary.total_sessions = outcomes.len();
        summary.current_streak = streak;
        if !outcomes.is_empty() {
            summary.success_rate = summary.successes as f64 / outcomes.len() as f64;
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }
}
