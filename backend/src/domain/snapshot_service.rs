//! Snapshot service: validated load, save and listing of daily records.

use std::sync::Arc;
use tracing::{info, warn};

use shared::{DateKey, DateKeyError, RecordShapeError, SnapshotRecord};

use crate::storage::{SnapshotStorage, StoredSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotServiceError {
    #[error(transparent)]
    InvalidDate(#[from] DateKeyError),
    #[error(transparent)]
    InvalidShape(#[from] RecordShapeError),
    #[error("No snapshot saved for {0}")]
    NotFound(String),
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct SnapshotService {
    storage: Arc<dyn SnapshotStorage>,
}

impl SnapshotService {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self { storage }
    }

    pub async fn load_snapshot(&self, date: &str) -> Result<StoredSnapshot, SnapshotServiceError> {
        let key = DateKey::parse(date)?;
        match self.storage.load_snapshot(&key).await? {
            Some(stored) => Ok(stored),
            None => {
                info!("No snapshot stored for {}", key);
                Err(SnapshotServiceError::NotFound(key.to_string()))
            }
        }
    }

    /// Validate and store a record, replacing whatever the date held before.
    pub async fn save_snapshot(
        &self,
        date: &str,
        record: &SnapshotRecord,
    ) -> Result<DateKey, SnapshotServiceError> {
        let key = DateKey::parse(date)?;
        if let Err(e) = record.validate() {
            warn!("Rejecting snapshot for {}: {}", key, e);
            return Err(e.into());
        }

        self.storage.save_snapshot(&key, record).await?;
        info!("Saved snapshot for {}", key);
        Ok(key)
    }

    pub async fn list_snapshot_dates(&self) -> Result<Vec<String>, SnapshotServiceError> {
        let dates = self.storage.list_snapshot_dates().await?;
        Ok(dates.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::StockSheet;

    async fn setup_service() -> SnapshotService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SnapshotService::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let service = setup_service().await;
        let record = SnapshotRecord::from_sheet(&StockSheet::default());

        let key = service.save_snapshot("2024-03-10", &record).await.unwrap();
        assert_eq!(key.as_str(), "2024-03-10");

        let stored = service.load_snapshot("2024-03-10").await.unwrap();
        assert_eq!(stored.record, record);
    }

    #[tokio::test]
    async fn test_load_absent_is_not_found() {
        let service = setup_service().await;
        let result = service.load_snapshot("2024-03-10").await;
        assert!(matches!(result, Err(SnapshotServiceError::NotFound(d)) if d == "2024-03-10"));
    }

    #[tokio::test]
    async fn test_invalid_date_rejected() {
        let service = setup_service().await;
        let record = SnapshotRecord::from_sheet(&StockSheet::default());

        assert!(matches!(
            service.save_snapshot("2024-02-30", &record).await,
            Err(SnapshotServiceError::InvalidDate(_))
        ));
        assert!(matches!(
            service.load_snapshot("yesterday").await,
            Err(SnapshotServiceError::InvalidDate(_))
        ));
    }

    #[tokio::test]
    async fn test_wrong_shape_rejected() {
        let service = setup_service().await;
        let mut record = SnapshotRecord::from_sheet(&StockSheet::default());
        record.skills.truncate(3);

        let result = service.save_snapshot("2024-03-10", &record).await;
        assert!(matches!(result, Err(SnapshotServiceError::InvalidShape(_))));
        assert!(service.list_snapshot_dates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_dates() {
        let service = setup_service().await;
        let record = SnapshotRecord::from_sheet(&StockSheet::default());
        service.save_snapshot("2024-03-11", &record).await.unwrap();
        service.save_snapshot("2024-03-10", &record).await.unwrap();

        assert_eq!(
            service.list_snapshot_dates().await.unwrap(),
            vec!["2024-03-10".to_string(), "2024-03-11".to_string()]
        );
    }
}
