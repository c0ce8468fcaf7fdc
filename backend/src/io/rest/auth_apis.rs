use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use shared::{AuthStatusResponse, LoginRequest, LoginResponse};

use super::auth_middleware::bearer_token;
use super::{api_error, ApiError};
use crate::domain::AuthError;
use crate::AppState;

/// Create the auth API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/status", get(status))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("POST /api/auth/login");

    match app_state.auth_service.login(&request.access_key).await {
        Ok(token) => Ok(Json(LoginResponse {
            token,
            success_message: "Signed in".to_string(),
        })),
        Err(e @ AuthError::EmptyAccessKey) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_INPUT"))
        }
        Err(e @ AuthError::InvalidAccessKey) => {
            Err(api_error(StatusCode::UNAUTHORIZED, e.to_string(), "INVALID_ACCESS_KEY"))
        }
    }
}

pub async fn logout(State(app_state): State<AppState>, headers: HeaderMap) -> Json<AuthStatusResponse> {
    info!("POST /api/auth/logout");

    if let Some(token) = bearer_token(&headers) {
        app_state.auth_service.logout(token).await;
    }
    Json(AuthStatusResponse { authenticated: false })
}

pub async fn status(State(app_state): State<AppState>, headers: HeaderMap) -> Json<AuthStatusResponse> {
    info!("GET /api/auth/status");

    let authenticated = match bearer_token(&headers) {
        Some(token) => app_state.auth_service.is_authenticated(token).await,
        None => false,
    };
    Json(AuthStatusResponse { authenticated })
}
