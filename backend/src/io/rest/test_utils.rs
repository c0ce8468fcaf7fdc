//! Router fixtures shared by the REST tests.

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde::de::DeserializeOwned;
use shared::LoginResponse;
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::config::ServerConfig;
use crate::storage::DbConnection;
use crate::{create_router, AppState};

pub const TEST_ACCESS_KEY: &str = "test-key";

/// Full router over a fresh in-memory database.
pub async fn setup_test_app() -> Router {
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    let app_state = AppState::new(Arc::new(db), TEST_ACCESS_KEY);
    create_router(app_state, &ServerConfig::default()).expect("Failed to build router")
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Log in with the test key and return the issued token.
pub async fn login(app: &Router) -> String {
    let body = serde_json::json!({ "access_key": TEST_ACCESS_KEY }).to_string();
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/auth/login", None, Some(body)))
        .await
        .unwrap();
    let login: LoginResponse = read_json(response).await;
    login.token
}
