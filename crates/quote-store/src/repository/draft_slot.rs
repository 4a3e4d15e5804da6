//! # Draft Slot Repository
//!
//! The draft slot stored as one row of the `draft_slot` table.
//!
//! ## Table Shape
//! ```text
//! ┌──────┬──────────────────────────────┬──────────────────────────────┐
//! │ slot │ payload                      │ saved_at                     │
//! ├──────┼──────────────────────────────┼──────────────────────────────┤
//! │  1   │ {"clientName":"Acme",...}    │ 2026-10-16T09:30:00Z         │
//! └──────┴──────────────────────────────┴──────────────────────────────┘
//!   CHECK (slot = 1) keeps the table at zero or one rows.
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::draft::DraftStore;
use crate::error::StoreResult;

const SLOT_ID: i64 = 1;

/// Draft slot persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteDraftStore {
    pool: SqlitePool,
}

impl SqliteDraftStore {
    /// Creates a new SqliteDraftStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteDraftStore { pool }
    }

    /// Returns when the current draft was written, if there is one.
    pub async fn saved_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let saved_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT saved_at FROM draft_slot WHERE slot = ?1")
                .bind(SLOT_ID)
                .fetch_optional(&self.pool)
                .await?;

        Ok(saved_at)
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn save(&self, blob: &str) -> StoreResult<()> {
        let now = Utc::now();

        debug!(bytes = blob.len(), "Upserting draft slot");

        sqlx::query(
            r#"
            INSERT INTO draft_slot (slot, payload, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(SLOT_ID)
        .bind(blob)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load(&self) -> StoreResult<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM draft_slot WHERE slot = ?1")
                .bind(SLOT_ID)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM draft_slot WHERE slot = ?1")
            .bind(SLOT_ID)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
