//! # REST API Interface Layer
//!
//! Route groups, each exposing its own `router()`:
//!
//! - `/api/auth`: login, logout and session status
//! - `/api/snapshots`: list, load and save daily records (bearer token required)
//! - `/api/snapshots/:date/export`: CSV download of a stored record
//! - `/api/logs`: frontend log forwarding

pub mod auth_apis;
pub mod auth_middleware;
pub mod export_apis;
pub mod logging_apis;
pub mod snapshot_apis;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::{http::StatusCode, Json};
use shared::ErrorResponse;

use crate::domain::SnapshotServiceError;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

impl From<SnapshotServiceError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: SnapshotServiceError) -> Self {
        match &e {
            SnapshotServiceError::InvalidDate(_) => {
                api_error(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_DATE")
            }
            SnapshotServiceError::InvalidShape(_) => {
                api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string(), "INVALID_RECORD")
            }
            SnapshotServiceError::NotFound(_) => {
                api_error(StatusCode::NOT_FOUND, e.to_string(), "NOT_FOUND")
            }
            SnapshotServiceError::Storage(inner) => {
                tracing::error!("Snapshot storage failure: {:#}", inner);
                api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error while accessing snapshots",
                    "STORAGE_ERROR",
                )
            }
        }
    }
}
