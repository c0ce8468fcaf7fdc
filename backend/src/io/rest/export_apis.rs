//! # REST API for Data Export
//!
//! CSV download of a stored snapshot.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::info;

use super::ApiError;
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/:date/export", get(export_snapshot_csv))
}

pub async fn export_snapshot_csv(
    State(app_state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response, ApiError> {
    info!("GET /api/snapshots/{}/export", date);

    let export = app_state.export_service.export_snapshot_csv(&date).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{json_request, login, read_text, setup_test_app};
    use axum::http::{header, Method, StatusCode};
    use shared::{SnapshotRecord, StockSheet, StockSheetRow};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_export_stored_snapshot() {
        let app = setup_test_app().await;
        let token = login(&app).await;

        let mut sheet = StockSheet::default();
        sheet.opening_stock[0] = StockSheetRow::new("Gold", 10.0);
        let body = serde_json::to_string(&SnapshotRecord::from_sheet(&sheet)).unwrap();
        app.clone()
            .oneshot(json_request(Method::PUT, "/api/snapshots/2024-03-10", Some(&token), Some(body)))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(Method::GET, "/api/snapshots/2024-03-10/export", Some(&token), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"stock-calculation-2024-03-10.csv\""
        );
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv"));

        let csv = read_text(response).await;
        assert!(csv.starts_with("Stock Calculation Sheet\nDate: 2024-03-10"));
        assert!(csv.contains("\"Gold\",10.000"));
        assert!(csv.ends_with("Closing Stock,10.000"));
    }

    #[tokio::test]
    async fn test_export_absent_snapshot_is_404() {
        let app = setup_test_app().await;
        let token = login(&app).await;

        let response = app
            .oneshot(json_request(Method::GET, "/api/snapshots/2024-03-10/export", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
