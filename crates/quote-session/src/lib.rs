//! # quote-session: Quote State Manager for Quote Desk
//!
//! One [`QuoteManager`] per session owns the live quote, applies edits,
//! recomputes totals on demand and moves the draft in and out of a
//! [`quote_store::DraftStore`].
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SessionConfig::load_or_default()                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  config.store.open().await ──► Arc<dyn DraftStore>                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteManager::open(store, observer).await   (load on start)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_item / update_item / set_client_info / toggle_tax_inclusive ...   │
//! │       │            every change ──► observer + watch snapshot          │
//! │       ▼                                                                 │
//! │  save_draft().await                          (save on command)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`manager`] - The `QuoteManager` and its builder
//! - [`observer`] - Events, snapshots and the observer trait
//! - [`config`] - TOML + environment session configuration
//! - [`error`] - Configuration errors

pub mod config;
pub mod error;
pub mod manager;
pub mod observer;

pub use config::{SessionConfig, SessionDefaults, StoreBackend, StoreSettings, DEFAULT_LOG_FILTER};
pub use error::{ConfigError, ConfigResult};
pub use manager::{QuoteManager, QuoteManagerBuilder};
pub use observer::{LoadOutcome, NoOpObserver, QuoteEvent, QuoteObserver, QuoteSnapshot, SaveOutcome};
