//! # Storage Layer
//!
//! Persistence for daily snapshots. The domain layer talks to the
//! [`SnapshotStorage`] trait; [`DbConnection`] implements it over SQLite.

pub mod db;
pub mod traits;

pub use db::DbConnection;
pub use traits::{SnapshotStorage, StoredSnapshot};
