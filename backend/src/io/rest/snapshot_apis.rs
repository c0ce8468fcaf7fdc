//! # REST API for Daily Snapshots

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{info, warn};

use shared::{SaveSnapshotResponse, SnapshotDatesResponse, SnapshotRecord};

use super::{api_error, ApiError};
use crate::AppState;

/// Create the snapshot API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_snapshot_dates))
        .route("/:date", get(get_snapshot).put(put_snapshot))
}

pub async fn list_snapshot_dates(
    State(app_state): State<AppState>,
) -> Result<Json<SnapshotDatesResponse>, ApiError> {
    info!("GET /api/snapshots");

    let dates = app_state.snapshot_service.list_snapshot_dates().await?;
    Ok(Json(SnapshotDatesResponse { dates }))
}

pub async fn get_snapshot(
    State(app_state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<SnapshotRecord>, ApiError> {
    info!("GET /api/snapshots/{}", date);

    let stored = app_state.snapshot_service.load_snapshot(&date).await?;
    Ok(Json(stored.record))
}

pub async fn put_snapshot(
    State(app_state): State<AppState>,
    Path(date): Path<String>,
    payload: Result<Json<SnapshotRecord>, JsonRejection>,
) -> Result<Json<SaveSnapshotResponse>, ApiError> {
    info!("PUT /api/snapshots/{}", date);

    let Json(record) = payload.map_err(|rejection| {
        warn!("Unreadable snapshot body for {}: {}", date, rejection);
        api_error(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text(), "INVALID_RECORD")
    })?;

    let key = app_state.snapshot_service.save_snapshot(&date, &record).await?;
    Ok(Json(SaveSnapshotResponse {
        date: key.to_string(),
        success_message: format!("Snapshot saved for {}", key),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{json_request, login, read_json, setup_test_app};
    use axum::http::{Method, StatusCode};
    use shared::{
        ErrorResponse, SaveSnapshotResponse, SnapshotDatesResponse, SnapshotRecord, StockSheet,
        StockSheetRow,
    };
    use tower::util::ServiceExt;

    fn sample_record() -> SnapshotRecord {
        let mut sheet = StockSheet::default();
        sheet.opening_stock[0] = StockSheetRow::new("Gold", 12.345);
        sheet.suspense[0].quantity = 0.4;
        SnapshotRecord::from_sheet(&sheet)
    }

    #[tokio::test]
    async fn test_snapshots_require_token() {
        let app = setup_test_app().await;

        for (method, uri) in [
            (Method::GET, "/api/snapshots"),
            (Method::GET, "/api/snapshots/2024-03-10"),
            (Method::GET, "/api/snapshots/2024-03-10/export"),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(method, uri, Some("bogus"), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
            let error: ErrorResponse = read_json(response).await;
            assert_eq!(error.code, "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_put_then_get_snapshot() {
        let app = setup_test_app().await;
        let token = login(&app).await;
        let record = sample_record();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/api/snapshots/2024-03-10",
                Some(&token),
                Some(serde_json::to_string(&record).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved: SaveSnapshotResponse = read_json(response).await;
        assert_eq!(saved.date, "2024-03-10");

        let response = app
            .oneshot(json_request(Method::GET, "/api/snapshots/2024-03-10", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let loaded: SnapshotRecord = read_json(response).await;
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_get_absent_snapshot_is_404() {
        let app = setup_test_app().await;
        let token = login(&app).await;

        let response = app
            .oneshot(json_request(Method::GET, "/api/snapshots/2024-03-10", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_date_is_400() {
        let app = setup_test_app().await;
        let token = login(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/snapshots/2024-02-30", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/api/snapshots/2024-3-1",
                Some(&token),
                Some(serde_json::to_string(&sample_record()).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "INVALID_DATE");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_422() {
        let app = setup_test_app().await;
        let token = login(&app).await;
        let mut record = sample_record();
        record.inventory.truncate(2);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/api/snapshots/2024-03-10",
                Some(&token),
                Some(serde_json::to_string(&record).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "INVALID_RECORD");

        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/api/snapshots/2024-03-10",
                Some(&token),
                Some("{\"inventory\": 3}".to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_dates_ascending() {
        let app = setup_test_app().await;
        let token = login(&app).await;
        let body = serde_json::to_string(&sample_record()).unwrap();

        for date in ["2024-03-12", "2024-03-10", "2024-03-11"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    Method::PUT,
                    &format!("/api/snapshots/{}", date),
                    Some(&token),
                    Some(body.clone()),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(json_request(Method::GET, "/api/snapshots", Some(&token), None))
            .await
            .unwrap();
        let listed: SnapshotDatesResponse = read_json(response).await;
        assert_eq!(listed.dates, vec!["2024-03-10", "2024-03-11", "2024-03-12"]);
    }
}
