//! # quote-store: Draft Slot Persistence for Quote Desk
//!
//! This crate implements the single-slot Draft Store. It moves opaque text
//! blobs in and out of storage and knows nothing about quotes.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         DraftStore (trait)                              │
//! │              save(blob) · load() -> Option<blob> · clear()              │
//! │                                                                         │
//! │   ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐ │
//! │   │ MemoryDraftStore │  │ FileDraftStore   │  │ SqliteDraftStore     │ │
//! │   │ RwLock<Option<_>>│  │ draft.json       │  │ draft_slot row       │ │
//! │   │ tests, ephemeral │  │ temp + rename    │  │ via DraftDatabase    │ │
//! │   └──────────────────┘  └──────────────────┘  └──────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`draft`] - The `DraftStore` contract and the in-memory slot
//! - [`file`] - JSON file slot
//! - [`pool`] - SQLite pool configuration and creation
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - SQLite slot implementation
//! - [`error`] - Store error types

pub mod draft;
pub mod error;
pub mod file;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use draft::{DraftStore, MemoryDraftStore};
pub use error::{StoreError, StoreResult};
pub use file::FileDraftStore;
pub use pool::{DbConfig, DraftDatabase};
pub use repository::SqliteDraftStore;
