//! # File Draft Store
//!
//! Keeps the draft slot in a single JSON file.
//!
//! ## Write Path
//! ```text
//! save(blob)
//!    │
//!    ▼
//! create parent dir (if missing)
//!    │
//!    ▼
//! write  draft.json.tmp   ← a crash here leaves the old draft intact
//!    │
//!    ▼
//! rename draft.json.tmp → draft.json   (atomic on the same filesystem)
//! ```

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::draft::DraftStore;
use crate::error::{StoreError, StoreResult};

/// Draft slot backed by one file on disk.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// Creates a store for `path`. Nothing is touched until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileDraftStore { path: path.into() }
    }

    /// Returns the draft file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "draft".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn save(&self, blob: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, blob).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        info!(path = %self.path.display(), bytes = blob.len(), "Draft saved");
        Ok(())
    }

    async fn load(&self) -> StoreResult<Option<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "Draft file read");
                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|e| StoreError::NotText(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No draft file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> StoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileDraftStore::new(temp.path().join("draft.json"));

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("draft.json");
        let store = FileDraftStore::new(&path);

        store.save(r#"{"clientName":"Acme"}"#).await.unwrap();

        assert!(path.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some(r#"{"clientName":"Acme"}"#)
        );
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = FileDraftStore::new(temp.path().join("draft.json"));

        store.save("old").await.unwrap();
        store.save("new").await.unwrap();

        assert_eq!(store.load().await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = FileDraftStore::new(temp.path().join("draft.json"));

        store.save("x").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_binary_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("draft.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = FileDraftStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::NotText(_)));
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = FileDraftStore::new(temp.path());

        assert!(store.load().await.is_err());
    }
}
