//! # Observers and Snapshots
//!
//! How the session manager tells the outside world that something changed.
//!
//! ## Notification Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  manager.add_item()                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────── state lock held ─────────────────┐                   │
//! │  │ 1. push blank item                               │                   │
//! │  │ 2. snapshot = QuoteSnapshot { quote, status, .. }│                   │
//! │  │ 3. watch channel  ◄── snapshot                   │                   │
//! │  │ 4. observer.on_change(ItemAdded { index }, snap) │                   │
//! │  └──────────────────────────────────────────────────┘                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_item() returns index                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers therefore always see fully applied state, in mutation order.
//! They run with the state lock held and must not call back into the
//! manager.

use quote_core::{Quote, QuoteStatus};
use serde::Serialize;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of [`QuoteManager::load_draft`](crate::QuoteManager::load_draft).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// A draft was decoded and replaced the live quote.
    Restored,
    /// The slot was empty; the live quote is unchanged.
    Empty,
    /// The slot held a blob that failed to decode; it was ignored.
    Discarded,
    /// The store itself failed; the live quote is unchanged.
    Failed,
}

/// Result of [`QuoteManager::save_draft`](crate::QuoteManager::save_draft).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The draft was written and status reset to Draft.
    Saved,
    /// Nothing changed; see `last_error`.
    Failed,
}

// =============================================================================
// Events
// =============================================================================

/// What just happened to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuoteEvent {
    Initialized,
    ClientInfoChanged,
    TaxModeChanged,
    ItemAdded { index: usize },
    ItemRemoved { index: usize },
    ItemUpdated { index: usize },
    StatusChanged,
    LoadStarted,
    LoadFinished { outcome: LoadOutcome },
    SaveStarted,
    SaveFinished { outcome: SaveOutcome },
}

/// Immutable view of the session right after a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub quote: Quote,
    pub status: QuoteStatus,
    pub is_loading: bool,
    pub is_saving: bool,
    pub last_error: Option<String>,
}

// =============================================================================
// Observer Trait
// =============================================================================

/// Receives every session change, synchronously.
pub trait QuoteObserver: Send + Sync {
    /// Called once per change with the post-change state.
    fn on_change(&self, event: &QuoteEvent, snapshot: &QuoteSnapshot);
}

/// Observer that ignores everything.
pub struct NoOpObserver;

impl QuoteObserver for NoOpObserver {
    fn on_change(&self, _event: &QuoteEvent, _snapshot: &QuoteSnapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<QuoteEvent>>);

    impl QuoteObserver for Recorder {
        fn on_change(&self, event: &QuoteEvent, _snapshot: &QuoteSnapshot) {
            self.0.lock().unwrap().push(*event);
        }
    }

    fn snapshot() -> QuoteSnapshot {
        QuoteSnapshot {
            quote: Quote::default(),
            status: QuoteStatus::Draft,
            is_loading: false,
            is_saving: false,
            last_error: None,
        }
    }

    #[test]
    fn test_observers_are_object_safe() {
        let observers: Vec<Box<dyn QuoteObserver>> = vec![
            Box::new(NoOpObserver),
            Box::new(Recorder(Mutex::new(Vec::new()))),
        ];
        for observer in &observers {
            observer.on_change(&QuoteEvent::Initialized, &snapshot());
        }
    }

    #[test]
    fn test_events_carry_outcomes() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        recorder.on_change(
            &QuoteEvent::LoadFinished {
                outcome: LoadOutcome::Discarded,
            },
            &snapshot(),
        );

        let events = recorder.0.lock().unwrap();
        assert_eq!(
            events[0],
            QuoteEvent::LoadFinished {
                outcome: LoadOutcome::Discarded
            }
        );
        assert_ne!(events[0], QuoteEvent::LoadStarted);
    }
}
