use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use gloo::storage::{LocalStorage, Storage};
use shared::{
    AuthStatusResponse, DateKey, ErrorResponse, LoginRequest, LoginResponse, SaveSnapshotResponse,
    SnapshotDatesResponse, SnapshotRecord,
};

use super::snapshot_store::{SnapshotBackend, StoreError};

const TOKEN_STORAGE_KEY: &str = "stock_sheet.session_token";

/// Session token kept in browser local storage.
pub fn stored_token() -> Option<String> {
    LocalStorage::get::<String>(TOKEN_STORAGE_KEY).ok()
}

pub fn store_token(token: &str) {
    if let Err(e) = LocalStorage::set(TOKEN_STORAGE_KEY, token) {
        gloo::console::warn!(format!("Failed to persist session token: {}", e));
    }
}

pub fn clear_token() {
    LocalStorage::delete(TOKEN_STORAGE_KEY);
}

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Same server, authenticated with `token`
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Map a non-2xx response onto a store error, preferring the server's
    /// `{error, code}` message.
    async fn error_from(response: Response) -> StoreError {
        match response.status() {
            401 => StoreError::Unauthorized,
            404 => StoreError::NotFound,
            status => match response.json::<ErrorResponse>().await {
                Ok(body) => StoreError::Rejected(body.error),
                Err(_) => StoreError::Rejected(format!("Server responded with status {}", status)),
            },
        }
    }

    pub async fn login(&self, access_key: &str) -> Result<LoginResponse, String> {
        let request = LoginRequest {
            access_key: access_key.to_string(),
        };
        let response = Request::post(&self.url("/api/auth/login"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if response.ok() {
            response
                .json::<LoginResponse>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            match response.json::<ErrorResponse>().await {
                Ok(body) => Err(body.error),
                Err(_) => Err("Sign in failed".to_string()),
            }
        }
    }

    pub async fn logout(&self) -> Result<(), String> {
        self.authorize(Request::post(&self.url("/api/auth/logout")))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Ok(())
    }

    pub async fn auth_status(&self) -> Result<bool, String> {
        let response = self
            .authorize(Request::get(&self.url("/api/auth/status")))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        let status = response
            .json::<AuthStatusResponse>()
            .await
            .map_err(|e| format!("Failed to parse auth status: {}", e))?;
        Ok(status.authenticated)
    }
}

#[async_trait(?Send)]
impl SnapshotBackend for ApiClient {
    async fn get_record(&self, date: &DateKey) -> Result<SnapshotRecord, StoreError> {
        let response = self
            .authorize(Request::get(&self.url(&format!("/api/snapshots/{}", date))))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<SnapshotRecord>()
            .await
            .map_err(|e| StoreError::Rejected(format!("Failed to parse snapshot: {}", e)))
    }

    async fn put_record(&self, date: &DateKey, record: &SnapshotRecord) -> Result<(), StoreError> {
        let response = self
            .authorize(Request::put(&self.url(&format!("/api/snapshots/{}", date))))
            .json(record)
            .map_err(|e| StoreError::Rejected(format!("Failed to serialize snapshot: {}", e)))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        let saved = response
            .json::<SaveSnapshotResponse>()
            .await
            .map_err(|e| StoreError::Rejected(format!("Failed to parse response: {}", e)))?;
        gloo::console::log!(saved.success_message);
        Ok(())
    }

    async fn list_dates(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .authorize(Request::get(&self.url("/api/snapshots")))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        let listed = response
            .json::<SnapshotDatesResponse>()
            .await
            .map_err(|e| StoreError::Rejected(format!("Failed to parse dates: {}", e)))?;
        Ok(listed.dates)
    }
}
