//! # Domain Layer
//!
//! Snapshot validation and persistence rules, access-key sessions and CSV
//! export. Handlers in `io::rest` translate these results into HTTP.

pub mod auth_service;
pub mod export_service;
pub mod snapshot_service;

pub use auth_service::{AuthError, AuthService};
pub use export_service::{CsvExport, ExportService};
pub use snapshot_service::{SnapshotService, SnapshotServiceError};
