//! # Storage Traits

use anyhow::Result;
use async_trait::async_trait;
use shared::{DateKey, SnapshotRecord};

/// A snapshot as persisted, with the time it was last written.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub date: DateKey,
    pub record: SnapshotRecord,
    /// RFC 3339 timestamp of the last save
    pub saved_at: String,
}

/// Keyed snapshot storage: one record per date, last write wins.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Store a record, replacing any prior value for the date
    async fn save_snapshot(&self, date: &DateKey, record: &SnapshotRecord) -> Result<()>;

    /// Fetch the record for a date, if one has been saved
    async fn load_snapshot(&self, date: &DateKey) -> Result<Option<StoredSnapshot>>;

    /// All saved dates, ascending
    async fn list_snapshot_dates(&self) -> Result<Vec<DateKey>>;
}
