//! Snapshot Store Adapter.
//!
//! Maps between the editable sheet and the backend's fixed-shape record, and
//! decides how transport failures surface: loads always yield a sheet,
//! saves report their error.

use async_trait::async_trait;
use shared::{default_sheet, DateKey, SheetDefaults, SnapshotRecord, StockSheet};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("No snapshot saved for this date")]
    NotFound,
    #[error("Your session has expired, please sign in again")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Network(String),
}

/// Remote keyed storage of snapshot records.
#[async_trait(?Send)]
pub trait SnapshotBackend {
    async fn get_record(&self, date: &DateKey) -> Result<SnapshotRecord, StoreError>;

    /// Replaces any prior value for the date
    async fn put_record(&self, date: &DateKey, record: &SnapshotRecord) -> Result<(), StoreError>;

    async fn list_dates(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    Stored,
    /// Nothing saved for the date
    Defaults,
    /// The load failed; defaults stand in and the caller should log the error
    Degraded(StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub sheet: StockSheet,
    pub source: LoadSource,
}

#[derive(Clone)]
pub struct SnapshotStore<B> {
    backend: B,
    defaults: SheetDefaults,
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub fn new(backend: B, defaults: SheetDefaults) -> Self {
        Self { backend, defaults }
    }

    pub async fn load_snapshot(&self, date: &DateKey) -> LoadOutcome {
        match self.backend.get_record(date).await {
            Ok(record) => LoadOutcome {
                sheet: record.to_sheet(),
                source: LoadSource::Stored,
            },
            Err(StoreError::NotFound) => LoadOutcome {
                sheet: default_sheet(&self.defaults),
                source: LoadSource::Defaults,
            },
            Err(e) => LoadOutcome {
                sheet: default_sheet(&self.defaults),
                source: LoadSource::Degraded(e),
            },
        }
    }

    /// Pad or truncate to the record shape and store it. No retry.
    pub async fn save_snapshot(&self, date: &DateKey, sheet: &StockSheet) -> Result<(), StoreError> {
        let record = SnapshotRecord::from_sheet(sheet);
        self.backend.put_record(date, &record).await
    }

    pub async fn list_snapshot_dates(&self) -> Result<Vec<String>, StoreError> {
        self.backend.list_dates().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Section, StockSheetRow};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// In-memory backend with an optional scripted failure.
    #[derive(Default)]
    struct FakeBackend {
        records: RefCell<BTreeMap<String, SnapshotRecord>>,
        failure: RefCell<Option<StoreError>>,
    }

    impl FakeBackend {
        fn failing(error: StoreError) -> Self {
            let backend = Self::default();
            *backend.failure.borrow_mut() = Some(error);
            backend
        }

        fn check(&self) -> Result<(), StoreError> {
            match self.failure.borrow().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl SnapshotBackend for FakeBackend {
        async fn get_record(&self, date: &DateKey) -> Result<SnapshotRecord, StoreError> {
            self.check()?;
            self.records
                .borrow()
                .get(date.as_str())
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn put_record(&self, date: &DateKey, record: &SnapshotRecord) -> Result<(), StoreError> {
            self.check()?;
            self.records
                .borrow_mut()
                .insert(date.to_string(), record.clone());
            Ok(())
        }

        async fn list_dates(&self) -> Result<Vec<String>, StoreError> {
            self.check()?;
            Ok(self.records.borrow().keys().cloned().collect())
        }
    }

    fn date(key: &str) -> DateKey {
        DateKey::parse(key).unwrap()
    }

    fn store(backend: FakeBackend) -> SnapshotStore<FakeBackend> {
        SnapshotStore::new(backend, SheetDefaults::default())
    }

    #[tokio::test]
    async fn test_absent_date_loads_defaults() {
        let store = store(FakeBackend::default());
        let outcome = store.load_snapshot(&date("2024-03-10")).await;

        assert_eq!(outcome.source, LoadSource::Defaults);
        assert_eq!(outcome.sheet, default_sheet(&SheetDefaults::default()));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = store(FakeBackend::default());
        let mut sheet = default_sheet(&SheetDefaults::default());
        sheet.opening_stock[0] = StockSheetRow::new("Gold", 12.345);
        sheet.purchase[9].quantity = 0.001;
        sheet.sales[2].quantity = 7.5;
        sheet.suspense[1].quantity = -0.25;

        store.save_snapshot(&date("2024-03-10"), &sheet).await.unwrap();
        let outcome = store.load_snapshot(&date("2024-03-10")).await;
        assert_eq!(outcome.source, LoadSource::Stored);

        for section in Section::ALL {
            for (before, after) in sheet.rows(section).iter().zip(outcome.sheet.rows(section)) {
                assert!(
                    (before.quantity - after.quantity).abs() < 0.001,
                    "{:?}: {} vs {}",
                    section,
                    before.quantity,
                    after.quantity
                );
            }
        }
        assert_eq!(outcome.sheet.opening_stock[0].name, "Gold");
    }

    #[tokio::test]
    async fn test_zero_quantities_round_trip() {
        let store = store(FakeBackend::default());
        let sheet = default_sheet(&SheetDefaults::default());

        store.save_snapshot(&date("2024-03-10"), &sheet).await.unwrap();
        let outcome = store.load_snapshot(&date("2024-03-10")).await;

        assert!(Section::ALL
            .iter()
            .all(|s| outcome.sheet.rows(*s).iter().all(|row| row.quantity == 0.0)));
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_defaults() {
        let store = store(FakeBackend::failing(StoreError::Network("offline".into())));
        let outcome = store.load_snapshot(&date("2024-03-10")).await;

        assert_eq!(outcome.source, LoadSource::Degraded(StoreError::Network("offline".into())));
        assert_eq!(outcome.sheet, default_sheet(&SheetDefaults::default()));
    }

    #[tokio::test]
    async fn test_save_failure_is_surfaced() {
        let store = store(FakeBackend::failing(StoreError::Unauthorized));
        let result = store
            .save_snapshot(&date("2024-03-10"), &StockSheet::default())
            .await;
        assert_eq!(result, Err(StoreError::Unauthorized));
    }

    #[tokio::test]
    async fn test_save_replaces_and_lists_dates() {
        let store = store(FakeBackend::default());
        let mut sheet = StockSheet::default();
        store.save_snapshot(&date("2024-03-11"), &sheet).await.unwrap();
        sheet.sales[0].quantity = 3.0;
        store.save_snapshot(&date("2024-03-11"), &sheet).await.unwrap();
        store.save_snapshot(&date("2024-03-10"), &sheet).await.unwrap();

        assert_eq!(
            store.list_snapshot_dates().await.unwrap(),
            vec!["2024-03-10".to_string(), "2024-03-11".to_string()]
        );
        let outcome = store.load_snapshot(&date("2024-03-11")).await;
        assert_eq!(outcome.sheet.sales[0].quantity, 3.0);
    }
}
