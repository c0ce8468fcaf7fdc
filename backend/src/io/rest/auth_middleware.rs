//! Bearer-token guard for the snapshot routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::api_error;
use crate::AppState;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_session(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_owned);
    let authenticated = match token {
        Some(token) => app_state.auth_service.is_authenticated(&token).await,
        None => false,
    };

    if !authenticated {
        warn!("Unauthenticated {} {}", request.method(), request.uri().path());
        return api_error(StatusCode::UNAUTHORIZED, "Authentication required", "UNAUTHORIZED")
            .into_response();
    }

    next.run(request).await
}
