use axum::{response::Json, routing::post, Router};
use tracing::{debug, error, info, warn};

use shared::{LogEntry, LogResponse};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Re-emit a browser log line through the server's subscriber.
pub async fn log_message(Json(entry): Json<LogEntry>) -> Json<LogResponse> {
    let component = entry.component.as_deref().unwrap_or("frontend");

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!(target: "frontend", "[{}] {}", component, entry.message),
        "warn" => warn!(target: "frontend", "[{}] {}", component, entry.message),
        "error" => error!(target: "frontend", "[{}] {}", component, entry.message),
        _ => info!(target: "frontend", "[{}] {}", component, entry.message),
    }

    Json(LogResponse { success: true })
}
