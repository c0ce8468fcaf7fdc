//! Access-key login and bearer-token sessions.
//!
//! There is one configured access key and no roles. Tokens live in memory and
//! do not survive a restart.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Access key cannot be empty")]
    EmptyAccessKey,
    #[error("Invalid access key")]
    InvalidAccessKey,
}

#[derive(Clone)]
pub struct AuthService {
    access_key: String,
    sessions: Arc<RwLock<HashSet<String>>>,
}

impl AuthService {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Exchange the access key for a fresh session token.
    pub async fn login(&self, access_key: &str) -> Result<String, AuthError> {
        let attempted = access_key.trim();
        if attempted.is_empty() {
            return Err(AuthError::EmptyAccessKey);
        }
        if attempted != self.access_key {
            warn!("Rejected login attempt");
            return Err(AuthError::InvalidAccessKey);
        }

        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone());
        info!("Session opened");
        Ok(token)
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.sessions.read().await.contains(token)
    }

    /// Revoke a token. Returns whether it was live.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if removed {
            info!("Session closed");
        }
        removed
    }
}
