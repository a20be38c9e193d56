//! Report stores.
//!
//! Two implementations of [`ReportStore`]:
//!
//! - [`MemoryReportStore`] - in-process map, for tests and embedding
//! - [`FileReportStore`] - one pretty-printed JSON file per report
//!
//! Both refuse to serve a record once its `expires_at` has passed: loading
//! it yields [`StoreError::Expired`] and drops the record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use rankscope_core::{ReportStore, StoredReport};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_reports_dir, ensure_dir, load_json, save_json};

/// Loads `id`, treating a missing record as [`StoreError::NotFound`].
pub async fn load_required<S>(store: &S, id: &str) -> Result<StoredReport, StoreError>
where
    S: ReportStore<Error = StoreError>,
{
    store
        .load(id)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-process report store.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportStore {
    records: Arc<RwLock<HashMap<String, StoredReport>>>,
}

impl MemoryReportStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true when no records are held.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Drops every expired record. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }
}

impl ReportStore for MemoryReportStore {
    type Error = StoreError;

    async fn save(&self, id: &str, record: &StoredReport) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(id.to_string(), record.clone());
        debug!(id, status = %record.status, "Report stored in memory");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<StoredReport>, StoreError> {
        let mut records = self.records.write().await;
        match records.get(id) {
            None => Ok(None),
            Some(record) if record.is_expired(Utc::now()) => {
                records.remove(id);
                Err(StoreError::Expired(id.to_string()))
            }
            Some(record) => Ok(Some(record.clone())),
        }
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Report store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    dir: PathBuf,
}

impl FileReportStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in the default reports directory.
    pub fn default_location() -> Self {
        Self::new(default_reports_dir())
    }

    /// The store's directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a report id maps to.
    ///
    /// Ids are restricted to ASCII letters, digits, `-` and `_` so they
    /// cannot escape the store directory.
    pub fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(self.dir.join(format!("{id}.json")))
        } else {
            Err(StoreError::Config(format!("invalid report id: {id:?}")))
        }
    }

    /// Deletes every expired report file. Returns how many were deleted.
    ///
    /// Files that cannot be parsed are left alone.
    pub async fn purge_expired(&self) -> Result<usize, StoreError> {
        if !tokio::fs::try_exists(&self.dir).await? {
            return Ok(0);
        }

        let now = Utc::now();
        let mut purged = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match load_json::<StoredReport>(&path).await {
                Ok(record) if record.is_expired(now) => {
                    tokio::fs::remove_file(&path).await?;
                    purged += 1;
                }
                Ok(_) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable report"),
            }
        }

        if purged > 0 {
            info!(purged, dir = %self.dir.display(), "Purged expired reports");
        }
        Ok(purged)
    }
}

impl ReportStore for FileReportStore {
    type Error = StoreError;

    async fn save(&self, id: &str, record: &StoredReport) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        ensure_dir(&self.dir).await?;
        save_json(&path, record).await?;
        debug!(id, path = %path.display(), status = %record.status, "Report stored");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<StoredReport>, StoreError> {
        let path = self.path_for(id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }

        let record: StoredReport = load_json(&path).await?;
        if record.is_expired(Utc::now()) {
            debug!(id, "Stored report expired, removing");
            tokio::fs::remove_file(&path).await?;
            return Err(StoreError::Expired(id.to_string()));
        }
        Ok(Some(record))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, ttl: Duration) -> StoredReport {
        let now = Utc::now();
        StoredReport::failed(id, "example.com", "no API key", now, now + ttl)
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryReportStore::new();
        let rec = record("r1", Duration::hours(1));
        store.save("r1", &rec).await.unwrap();

        assert_eq!(store.load("r1").await.unwrap(), Some(rec));
        assert_eq!(store.load("missing").await.unwrap(), None);
        assert!(matches!(
            load_required(&store, "missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_refuses_expired() {
        let store = MemoryReportStore::new();
        store.save("old", &record("old", Duration::seconds(-1))).await.unwrap();
        store.save("new", &record("new", Duration::hours(1))).await.unwrap();

        assert!(matches!(store.load("old").await, Err(StoreError::Expired(_))));
        assert_eq!(store.load("old").await.unwrap(), None);

        store.save("old2", &record("old2", Duration::seconds(-1))).await.unwrap();
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let store = FileReportStore::new("/tmp/reports");
        assert!(store.path_for("3f2a-b_9").unwrap().ends_with("3f2a-b_9.json"));
        for bad in ["", "../etc/passwd", "a/b", "a.b"] {
            assert!(matches!(store.path_for(bad), Err(StoreError::Config(_))), "{bad}");
        }
    }
}
