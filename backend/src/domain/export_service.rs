//! CSV export of stored snapshots.
//!
//! Renders exactly what the browser would produce for the same sheet, so a
//! download from either side is byte-identical.

use tracing::info;

use shared::{calculate_totals, export_file_name, render_csv};

use super::snapshot_service::{SnapshotService, SnapshotServiceError};

/// A rendered export ready to send as an attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

#[derive(Clone)]
pub struct ExportService {
    snapshot_service: SnapshotService,
}

impl ExportService {
    pub fn new(snapshot_service: SnapshotService) -> Self {
        Self { snapshot_service }
    }

    pub async fn export_snapshot_csv(&self, date: &str) -> Result<CsvExport, SnapshotServiceError> {
        let stored = self.snapshot_service.load_snapshot(date).await?;
        let sheet = stored.record.to_sheet();
        let totals = calculate_totals(&sheet);

        info!("Exporting snapshot for {} as CSV", stored.date);
        Ok(CsvExport {
            file_name: export_file_name(&stored.date),
            content: render_csv(&sheet, &totals, &stored.date),
        })
    }
}
