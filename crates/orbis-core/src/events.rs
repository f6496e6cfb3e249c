//! Progress events and their fan-out.
//!
//! Every XP mutation produces an Event the embedding application forwards
//! to its UI layer. The bus is an explicit observer list owned by the
//! context that created it; there is no process-wide state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::focus::{FocusOutcome, FocusStatus};

/// Every progression change in the system produces an Event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A finished session was classified.
    SessionEvaluated {
        status: FocusStatus,
        xp_delta: i64,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// An XP delta was applied to the running total.
    XpApplied {
        previous_total: f64,
        new_total: f64,
        delta: i64,
        at: DateTime<Utc>,
    },
    /// The applied delta crossed a level boundary, in either direction.
    LevelChanged {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Build a `SessionEvaluated` event from an outcome and its duration.
    pub fn session_evaluated(outcome: &FocusOutcome, elapsed_secs: u64) -> Self {
        Event::SessionEvaluated {
            status: outcome.status,
            xp_delta: outcome.xp_delta,
            elapsed_secs,
            at: Utc::now(),
        }
    }
}

/// Caller-owned observer list. Subscribers are invoked in registration
/// order on every publish; dropping the bus drops the subscriptions.
pub struct EventBus {
    subscribers: Vec<Box<dyn FnMut(&Event) + Send>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a callback for every published event.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Fan an event out to every subscriber.
    pub fn publish(&mut self, event: &Event) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Publish a batch of events in order.
    pub fn publish_all(&mut self, events: &[Event]) {
        for event in events {
            self.publish(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
