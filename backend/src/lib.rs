//! # Stock Sheet Backend
//!
//! Keyed snapshot storage for the daily stock calculation sheet.
//!
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! IO Layer (REST API, auth guard)
//!     ↓
//! Domain Layer (snapshot validation, sessions, export)
//!     ↓
//! Storage Layer (SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{AuthService, ExportService, SnapshotService};
use crate::io::rest::{auth_apis, auth_middleware, export_apis, logging_apis, snapshot_apis};
use crate::storage::{DbConnection, SnapshotStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub snapshot_service: SnapshotService,
    pub export_service: ExportService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(storage: Arc<dyn SnapshotStorage>, access_key: &str) -> Self {
        let snapshot_service = SnapshotService::new(storage);
        Self {
            export_service: ExportService::new(snapshot_service.clone()),
            snapshot_service,
            auth_service: AuthService::new(access_key),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(db_conn), &config.access_key))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .with_context(|| format!("Invalid allowed_origin '{}'", config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let snapshot_routes = snapshot_apis::router()
        .merge(export_apis::router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware::require_session,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_apis::router())
        .nest("/snapshots", snapshot_routes)
        .nest("/logs", logging_apis::router());

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(static_dir) = &config.static_dir {
        info!("Serving frontend from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
