//! # Draft Store Contract
//!
//! The abstract single-slot persistence the session manager depends on.
//!
//! ## Single Slot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   save("{...v1...}")  ──►  [ slot: v1 ]                                 │
//! │   save("{...v2...}")  ──►  [ slot: v2 ]   (v1 is gone, no history)      │
//! │   load()              ──►  Some("{...v2...}")                           │
//! │   clear()             ──►  [ slot: empty ]                              │
//! │   load()              ──►  None                                         │
//! │                                                                         │
//! │   No keys, no versions: at most one draft exists at any time.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blobs are opaque text. The store never inspects them.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreResult;

/// Asynchronous single-slot draft persistence.
///
/// Implementations must be safe to share (`Arc<dyn DraftStore>`). Callers
/// are responsible for not overlapping save/load on the same slot; the
/// session manager queues its own calls.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Replaces the slot contents with `blob`.
    async fn save(&self, blob: &str) -> StoreResult<()>;

    /// Returns the slot contents, or `None` if nothing was saved.
    async fn load(&self) -> StoreResult<Option<String>>;

    /// Empties the slot. Clearing an empty slot is not an error.
    async fn clear(&self) -> StoreResult<()>;
}

// =============================================================================
// Memory Draft Store
// =============================================================================

/// Draft slot held in process memory.
///
/// ## Usage
/// - Tests
/// - The `memory` backend, where drafts only live for the session
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: RwLock<Option<String>>,
}

impl MemoryDraftStore {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        MemoryDraftStore {
            slot: RwLock::new(Some(blob.into())),
        }
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, blob: &str) -> StoreResult<()> {
        debug!(bytes = blob.len(), "Saving draft to memory slot");
        *self.slot.write().await = Some(blob.to_string());
        Ok(())
    }

    async fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_slot_starts_empty() {
        let store = MemoryDraftStore::new();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites_single_slot() {
        let store = MemoryDraftStore::new();
        store.save("first").await.unwrap();
        store.save("second").await.unwrap();

        assert_eq!(store.load().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_clear_empties_slot() {
        let store = MemoryDraftStore::with_blob("{}");
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: Arc<dyn DraftStore> = Arc::new(MemoryDraftStore::new());
        store.save("blob").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("blob"));
    }
}
