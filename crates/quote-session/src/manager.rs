//! # Quote Manager
//!
//! Owns the single live quote of a session.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         QuoteManager                                    │
//! │                                                                         │
//! │   state: Mutex<SessionState>          op_gate: tokio Mutex<()>          │
//! │   ┌───────────────────────────┐       ┌──────────────────────────┐      │
//! │   │ quote       (one Quote)   │       │ load_draft ─┐            │      │
//! │   │ status      Draft/Sent/.. │       │ save_draft ─┼─► FIFO,    │      │
//! │   │ is_loading / is_saving    │       │ save_draft ─┘   one at   │      │
//! │   │ last_error                │       │                 a time   │      │
//! │   └───────────────────────────┘       └──────────────────────────┘      │
//! │         ▲           │                              │                    │
//! │  sync mutations     │ snapshot on every change     │ awaits             │
//! │  (never suspend)    ▼                              ▼                    │
//! │              observer + watch channel        Arc<dyn DraftStore>        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Draft load and save never return errors. Store and decode failures are
//! logged, recorded in `last_error`, and leave the live quote untouched.
//! Index and arithmetic errors are returned to the caller. A load or save
//! whose future is dropped early still clears its busy flag.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quote_core::{
    decode, encode, ClientInfoUpdate, CoreResult, LineTotals, Quote, QuoteItem, QuoteStatus,
    QuoteTotals,
};
use quote_store::DraftStore;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::SessionDefaults;
use crate::observer::{
    LoadOutcome, NoOpObserver, QuoteEvent, QuoteObserver, QuoteSnapshot, SaveOutcome,
};

// =============================================================================
// Session State
// =============================================================================

#[derive(Debug)]
struct SessionState {
    quote: Quote,
    status: QuoteStatus,
    is_loading: bool,
    is_saving: bool,
    last_error: Option<String>,
}

impl SessionState {
    fn new(defaults: &SessionDefaults) -> Self {
        SessionState {
            quote: Quote {
                currency_code: defaults.currency_code.clone(),
                tax_inclusive: defaults.tax_inclusive,
                ..Quote::default()
            },
            status: QuoteStatus::Draft,
            is_loading: false,
            is_saving: false,
            last_error: None,
        }
    }

    fn snapshot(&self) -> QuoteSnapshot {
        QuoteSnapshot {
            quote: self.quote.clone(),
            status: self.status,
            is_loading: self.is_loading,
            is_saving: self.is_saving,
            last_error: self.last_error.clone(),
        }
    }
}

// =============================================================================
// Quote Manager
// =============================================================================

/// The session's quote, its workflow status and its draft lifecycle.
///
/// Construct one per session and pass it by reference (or `Arc`) to whatever
/// edits or displays the quote.
///
/// ## Example
/// ```rust,ignore
/// let store: Arc<dyn DraftStore> = Arc::new(MemoryDraftStore::new());
/// let manager = QuoteManager::open(store, None).await;
///
/// let index = manager.add_item();
/// manager.update_item(index, QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0))?;
/// manager.save_draft().await;
/// ```
pub struct QuoteManager {
    store: Arc<dyn DraftStore>,
    observer: Arc<dyn QuoteObserver>,
    state: Mutex<SessionState>,
    snapshots: watch::Sender<QuoteSnapshot>,
    op_gate: tokio::sync::Mutex<()>,
}

impl QuoteManager {
    /// Creates a manager with a default quote and no observer.
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self::builder(store).build()
    }

    /// Creates a manager that reports every change to `observer`.
    pub fn with_observer(store: Arc<dyn DraftStore>, observer: Arc<dyn QuoteObserver>) -> Self {
        Self::builder(store).observer(observer).build()
    }

    /// Creates a manager whose initial quote uses `defaults`.
    pub fn with_defaults(store: Arc<dyn DraftStore>, defaults: SessionDefaults) -> Self {
        Self::builder(store).defaults(defaults).build()
    }

    /// Creates a manager and restores the last draft, if any.
    pub async fn open(
        store: Arc<dyn DraftStore>,
        observer: Option<Arc<dyn QuoteObserver>>,
    ) -> Self {
        let mut builder = Self::builder(store);
        if let Some(observer) = observer {
            builder = builder.observer(observer);
        }
        builder.open().await
    }

    /// Starts a builder for the less common combinations.
    pub fn builder(store: Arc<dyn DraftStore>) -> QuoteManagerBuilder {
        QuoteManagerBuilder::new(store)
    }

    fn from_parts(
        store: Arc<dyn DraftStore>,
        observer: Arc<dyn QuoteObserver>,
        defaults: SessionDefaults,
    ) -> Self {
        let state = SessionState::new(&defaults);
        let (snapshots, _) = watch::channel(state.snapshot());

        let manager = QuoteManager {
            store,
            observer,
            state: Mutex::new(state),
            snapshots,
            op_gate: tokio::sync::Mutex::new(()),
        };

        {
            let state = manager.lock_state();
            manager.publish(&state, QuoteEvent::Initialized);
        }

        debug!(
            currency = %defaults.currency_code,
            tax_inclusive = defaults.tax_inclusive,
            "Quote session initialized"
        );
        manager
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends the post-change state to watchers and the observer.
    ///
    /// Callers hold the state lock, so notifications follow mutation order.
    fn publish(&self, state: &SessionState, event: QuoteEvent) {
        let snapshot = state.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        self.observer.on_change(&event, &snapshot);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Updates only the client fields that are `Some`.
    ///
    /// An update with no fields changes nothing and notifies no one.
    pub fn set_client_info(&self, update: ClientInfoUpdate) {
        if update.is_empty() {
            return;
        }
        let mut state = self.lock_state();
        state.quote.apply_client_info(update);
        self.publish(&state, QuoteEvent::ClientInfoChanged);
    }

    /// Switches between tax-exclusive (`false`) and tax-inclusive (`true`).
    ///
    /// Stored rates are not touched; they are reinterpreted under the new
    /// mode, so totals can jump.
    pub fn toggle_tax_inclusive(&self, tax_inclusive: bool) {
        let mut state = self.lock_state();
        state.quote.tax_inclusive = tax_inclusive;
        debug!(tax_inclusive, "Tax mode set");
        self.publish(&state, QuoteEvent::TaxModeChanged);
    }

    /// Appends a blank item and returns its index.
    pub fn add_item(&self) -> usize {
        let mut state = self.lock_state();
        let index = state.quote.add_item();
        debug!(index, "Item added");
        self.publish(&state, QuoteEvent::ItemAdded { index });
        index
    }

    /// Removes the item at `index`.
    ///
    /// ## Returns
    /// - `Ok(false)` when only one item remains (nothing happens)
    /// - `Ok(true)` when the item was removed
    /// - `Err(ItemIndexOutOfRange)` for a bad index
    pub fn remove_item(&self, index: usize) -> CoreResult<bool> {
        let mut state = self.lock_state();
        let removed = state.quote.remove_item(index)?;
        if removed {
            debug!(index, "Item removed");
            self.publish(&state, QuoteEvent::ItemRemoved { index });
        }
        Ok(removed)
    }

    /// Replaces the item at `index` wholesale.
    pub fn update_item(&self, index: usize, item: QuoteItem) -> CoreResult<()> {
        let mut state = self.lock_state();
        state.quote.update_item(index, item)?;
        self.publish(&state, QuoteEvent::ItemUpdated { index });
        Ok(())
    }

    /// Overwrites the workflow status unconditionally.
    pub fn set_status(&self, status: QuoteStatus) {
        let mut state = self.lock_state();
        state.status = status;
        info!(%status, "Quote status changed");
        self.publish(&state, QuoteEvent::StatusChanged);
    }

    /// Marks the quote as sent to the client.
    pub fn mark_sent(&self) {
        self.set_status(QuoteStatus::Sent);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a copy of the live quote.
    pub fn quote(&self) -> Quote {
        self.lock_state().quote.clone()
    }

    pub fn status(&self) -> QuoteStatus {
        self.lock_state().status
    }

    /// True only while [`load_draft`](Self::load_draft) is running.
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    /// True only while [`save_draft`](Self::save_draft) is running.
    pub fn is_saving(&self) -> bool {
        self.lock_state().is_saving
    }

    /// Message from the most recent failed load or save.
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    pub fn snapshot(&self) -> QuoteSnapshot {
        self.lock_state().snapshot()
    }

    /// Returns a receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<QuoteSnapshot> {
        self.snapshots.subscribe()
    }

    /// Aggregates over the current items. Recomputed on every call.
    pub fn totals(&self) -> CoreResult<QuoteTotals> {
        self.lock_state().quote.totals()
    }

    pub fn subtotal_net(&self) -> CoreResult<f64> {
        self.totals().map(|t| t.subtotal_net)
    }

    pub fn total_tax(&self) -> CoreResult<f64> {
        self.totals().map(|t| t.total_tax)
    }

    pub fn grand_total(&self) -> CoreResult<f64> {
        self.totals().map(|t| t.grand_total)
    }

    /// Per-line results in item order.
    pub fn line_totals(&self) -> CoreResult<Vec<LineTotals>> {
        self.lock_state().quote.line_totals()
    }

    // =========================================================================
    // Draft Lifecycle
    // =========================================================================

    /// Restores the draft slot into the live quote.
    ///
    /// ## Flow
    /// ```text
    /// wait for op_gate
    ///     │
    ///     ▼
    /// is_loading = true ──► LoadStarted
    ///     │
    ///     ▼
    /// store.load()
    ///     ├── Err        → Failed     (quote kept, last_error set)
    ///     ├── None       → Empty      (quote kept)
    ///     └── Some(blob) → decode
    ///             ├── Err → Discarded (quote kept, last_error set)
    ///             └── Ok  → Restored  (quote replaced, status = Draft)
    ///     │
    ///     ▼
    /// is_loading = false ──► LoadFinished { outcome }
    /// ```
    ///
    /// A restored quote with no items gets one blank item.
    pub async fn load_draft(&self) -> LoadOutcome {
        let _gate = self.op_gate.lock().await;
        let busy = BusyGuard::start(self, Busy::Loading);

        let result = self.store.load().await;

        let mut state = self.lock_state();
        let outcome = match result {
            Err(e) => {
                warn!(error = %e, "Failed to read draft, keeping current quote");
                state.last_error = Some(e.to_string());
                LoadOutcome::Failed
            }
            Ok(None) => {
                debug!("No saved draft");
                LoadOutcome::Empty
            }
            Ok(Some(blob)) => match decode(&blob) {
                Ok(mut quote) => {
                    if quote.ensure_has_item() {
                        debug!("Restored draft had no items, added a blank one");
                    }
                    info!(items = quote.item_count(), "Draft restored");
                    state.quote = quote;
                    state.status = QuoteStatus::Draft;
                    state.last_error = None;
                    LoadOutcome::Restored
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable draft");
                    state.last_error = Some(e.to_string());
                    LoadOutcome::Discarded
                }
            },
        };

        state.is_loading = false;
        self.publish(&state, QuoteEvent::LoadFinished { outcome });
        busy.disarm();
        outcome
    }

    /// Writes the live quote to the draft slot.
    ///
    /// The quote is captured once this call reaches the front of the queue,
    /// so a save that waited behind another operation writes the newest
    /// state. On success the status returns to Draft.
    pub async fn save_draft(&self) -> SaveOutcome {
        let _gate = self.op_gate.lock().await;
        let busy = BusyGuard::start(self, Busy::Saving);

        let encoded = encode(&self.lock_state().quote);

        let result = match encoded {
            Ok(blob) => self.store.save(&blob).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let mut state = self.lock_state();
        let outcome = match result {
            Ok(()) => {
                info!("Draft saved");
                state.status = QuoteStatus::Draft;
                state.last_error = None;
                SaveOutcome::Saved
            }
            Err(message) => {
                error!(error = %message, "Failed to save draft");
                state.last_error = Some(message);
                SaveOutcome::Failed
            }
        };

        state.is_saving = false;
        self.publish(&state, QuoteEvent::SaveFinished { outcome });
        busy.disarm();
        outcome
    }
}

// =============================================================================
// Busy Flag Guard
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Busy {
    Loading,
    Saving,
}

/// Raises `is_loading` or `is_saving` for the life of one draft operation.
///
/// The normal path clears the flag itself and calls [`disarm`](Self::disarm).
/// If the operation's future is dropped first, `Drop` clears the flag,
/// records the interruption in `last_error` and publishes a `Failed` finish.
struct BusyGuard<'a> {
    manager: &'a QuoteManager,
    busy: Busy,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn start(manager: &'a QuoteManager, busy: Busy) -> Self {
        let mut state = manager.lock_state();
        let event = match busy {
            Busy::Loading => {
                state.is_loading = true;
                QuoteEvent::LoadStarted
            }
            Busy::Saving => {
                state.is_saving = true;
                QuoteEvent::SaveStarted
            }
        };
        manager.publish(&state, event);

        BusyGuard {
            manager,
            busy,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self.manager.lock_state();
        let event = match self.busy {
            Busy::Loading => {
                state.is_loading = false;
                state.last_error = Some("draft load was interrupted".to_string());
                QuoteEvent::LoadFinished {
                    outcome: LoadOutcome::Failed,
                }
            }
            Busy::Saving => {
                state.is_saving = false;
                state.last_error = Some("draft save was interrupted".to_string());
                QuoteEvent::SaveFinished {
                    outcome: SaveOutcome::Failed,
                }
            }
        };
        warn!(operation = ?self.busy, "Draft operation dropped before completion");
        self.manager.publish(&state, event);
    }
}

impl std::fmt::Debug for QuoteManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteManager")
            .field("state", &*self.lock_state())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`QuoteManager`].
pub struct QuoteManagerBuilder {
    store: Arc<dyn DraftStore>,
    observer: Option<Arc<dyn QuoteObserver>>,
    defaults: SessionDefaults,
}

impl QuoteManagerBuilder {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        QuoteManagerBuilder {
            store,
            observer: None,
            defaults: SessionDefaults::default(),
        }
    }

    pub fn observer(mut self, observer: Arc<dyn QuoteObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> QuoteManager {
        let observer = self.observer.unwrap_or_else(|| Arc::new(NoOpObserver));
        QuoteManager::from_parts(self.store, observer, self.defaults)
    }

    /// Builds the manager and runs the initial draft load.
    pub async fn open(self) -> QuoteManager {
        let manager = self.build();
        manager.load_draft().await;
        manager
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::CoreError;
    use quote_store::MemoryDraftStore;

    struct Recorder {
        events: Mutex<Vec<(QuoteEvent, QuoteSnapshot)>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Recorder {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<QuoteEvent> {
            self.events.lock().unwrap().iter().map(|(e, _)| *e).collect()
        }

        fn last_snapshot(&self) -> QuoteSnapshot {
            self.events.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl QuoteObserver for Recorder {
        fn on_change(&self, event: &QuoteEvent, snapshot: &QuoteSnapshot) {
            self.events.lock().unwrap().push((*event, snapshot.clone()));
        }
    }

    fn memory() -> Arc<dyn DraftStore> {
        Arc::new(MemoryDraftStore::new())
    }

    fn widget() -> QuoteItem {
        QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0)
    }

    #[test]
    fn test_new_manager_has_one_item_and_draft_status() {
        let manager = QuoteManager::new(memory());

        assert_eq!(manager.quote().item_count(), 1);
        assert_eq!(manager.status(), QuoteStatus::Draft);
        assert!(!manager.is_loading());
        assert!(!manager.is_saving());
        assert_eq!(manager.last_error(), None);
    }

    #[test]
    fn test_construction_notifies() {
        let recorder = Recorder::new();
        let _manager = QuoteManager::with_observer(memory(), recorder.clone());

        assert_eq!(recorder.events(), vec![QuoteEvent::Initialized]);
    }

    #[test]
    fn test_defaults_seed_initial_quote() {
        let manager = QuoteManager::with_defaults(
            memory(),
            SessionDefaults {
                currency_code: "USD".into(),
                tax_inclusive: true,
            },
        );

        let quote = manager.quote();
        assert_eq!(quote.currency_code, "USD");
        assert!(quote.tax_inclusive);
    }

    #[test]
    fn test_client_info_partial_update() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());

        manager.set_client_info(ClientInfoUpdate {
            name: Some("Acme".into()),
            address: Some("1 Road".into()),
            reference: Some("Q-1".into()),
        });
        manager.set_client_info(ClientInfoUpdate {
            address: Some("2 Road".into()),
            ..Default::default()
        });

        let quote = manager.quote();
        assert_eq!(quote.client_name, "Acme");
        assert_eq!(quote.client_address, "2 Road");
        assert_eq!(quote.reference, "Q-1");
        assert_eq!(
            recorder.events(),
            vec![
                QuoteEvent::Initialized,
                QuoteEvent::ClientInfoChanged,
                QuoteEvent::ClientInfoChanged
            ]
        );
    }

    #[test]
    fn test_empty_client_update_is_silent() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());

        manager.set_client_info(ClientInfoUpdate::default());

        assert_eq!(recorder.events(), vec![QuoteEvent::Initialized]);
    }

    #[test]
    fn test_items_and_totals() {
        let manager = QuoteManager::new(memory());

        assert_eq!(manager.grand_total().unwrap(), 0.0);

        manager.update_item(0, widget()).unwrap();
        assert_eq!(manager.subtotal_net().unwrap(), 180.0);
        assert!((manager.total_tax().unwrap() - 32.4).abs() < 1e-9);
        assert!((manager.grand_total().unwrap() - 212.4).abs() < 1e-9);

        manager.toggle_tax_inclusive(true);
        assert_eq!(manager.grand_total().unwrap(), 180.0);
        assert_eq!(manager.line_totals().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_last_item_is_silent_noop() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());
        manager.update_item(0, widget()).unwrap();

        assert_eq!(manager.remove_item(0), Ok(false));
        assert_eq!(manager.remove_item(5), Ok(false));

        assert_eq!(manager.quote().items, vec![widget()]);
        assert_eq!(
            recorder.events(),
            vec![QuoteEvent::Initialized, QuoteEvent::ItemUpdated { index: 0 }]
        );
    }

    #[test]
    fn test_add_then_remove_restores_items() {
        let manager = QuoteManager::new(memory());
        manager.update_item(0, widget()).unwrap();
        let before = manager.quote().items;

        let index = manager.add_item();
        assert_eq!(index, 1);
        assert_eq!(manager.remove_item(index), Ok(true));

        assert_eq!(manager.quote().items, before);
    }

    #[test]
    fn test_bad_index_errors_without_notifying() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());
        manager.add_item();

        assert_eq!(
            manager.update_item(7, widget()),
            Err(CoreError::ItemIndexOutOfRange { index: 7, len: 2 })
        );
        assert!(manager.remove_item(2).is_err());
        assert_eq!(
            recorder.events(),
            vec![QuoteEvent::Initialized, QuoteEvent::ItemAdded { index: 1 }]
        );
    }

    #[test]
    fn test_inclusive_minus_hundred_surfaces_error() {
        let manager = QuoteManager::new(memory());
        manager
            .update_item(0, QuoteItem::new("Rebate", 1.0, 50.0, 0.0, -100.0))
            .unwrap();
        manager.toggle_tax_inclusive(true);

        assert!(matches!(
            manager.grand_total(),
            Err(CoreError::TaxBackOutDivisionByZero { .. })
        ));
    }

    #[test]
    fn test_status_transitions() {
        let manager = QuoteManager::new(memory());

        manager.mark_sent();
        assert_eq!(manager.status(), QuoteStatus::Sent);

        manager.set_status(QuoteStatus::Accepted);
        assert_eq!(manager.status(), QuoteStatus::Accepted);
    }

    #[test]
    fn test_observer_sees_post_mutation_state() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());

        manager.add_item();
        assert_eq!(recorder.last_snapshot().quote.item_count(), 2);

        manager.toggle_tax_inclusive(true);
        assert!(recorder.last_snapshot().quote.tax_inclusive);
    }

    #[test]
    fn test_watch_channel_tracks_latest_snapshot() {
        let manager = QuoteManager::new(memory());
        let rx = manager.subscribe();

        manager.add_item();
        manager.mark_sent();

        let latest = rx.borrow().clone();
        assert_eq!(latest.quote.item_count(), 2);
        assert_eq!(latest.status, QuoteStatus::Sent);
        assert_eq!(latest, manager.snapshot());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = memory();
        let manager = QuoteManager::new(store.clone());
        manager.set_client_info(ClientInfoUpdate {
            name: Some("Acme".into()),
            ..Default::default()
        });
        manager.update_item(0, widget()).unwrap();
        manager.mark_sent();

        assert_eq!(manager.save_draft().await, SaveOutcome::Saved);
        assert_eq!(manager.status(), QuoteStatus::Draft);

        let restored = QuoteManager::open(store, None).await;
        assert_eq!(restored.quote(), manager.quote());
        assert_eq!(restored.status(), QuoteStatus::Draft);
    }

    #[tokio::test]
    async fn test_load_event_sequence() {
        let recorder = Recorder::new();
        let manager = QuoteManager::with_observer(memory(), recorder.clone());

        assert_eq!(manager.load_draft().await, LoadOutcome::Empty);

        let events = recorder.events.lock().unwrap();
        assert_eq!(events[1].0, QuoteEvent::LoadStarted);
        assert!(events[1].1.is_loading);
        assert_eq!(
            events[2].0,
            QuoteEvent::LoadFinished {
                outcome: LoadOutcome::Empty
            }
        );
        assert!(!events[2].1.is_loading);
    }

    #[tokio::test]
    async fn test_restored_empty_items_gets_blank_item() {
        let store: Arc<dyn DraftStore> =
            Arc::new(MemoryDraftStore::with_blob(r#"{"clientName":"Acme","items":[]}"#));

        let manager = QuoteManager::open(store, None).await;

        let quote = manager.quote();
        assert_eq!(quote.client_name, "Acme");
        assert_eq!(quote.items, vec![QuoteItem::default()]);
    }

    #[tokio::test]
    async fn test_malformed_draft_is_discarded() {
        let store: Arc<dyn DraftStore> = Arc::new(MemoryDraftStore::with_blob("[1, 2, 3]"));
        let manager = QuoteManager::new(store);
        manager.update_item(0, widget()).unwrap();

        assert_eq!(manager.load_draft().await, LoadOutcome::Discarded);
        assert_eq!(manager.quote().items, vec![widget()]);
        assert!(manager.last_error().is_some());
        assert!(!manager.is_loading());
    }
}
