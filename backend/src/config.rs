//! Server configuration: a YAML file plus environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_PATH_ENV: &str = "STOCK_SHEET_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "stock_sheet.yaml";

const BIND_ENV: &str = "STOCK_SHEET_BIND";
const DATABASE_URL_ENV: &str = "STOCK_SHEET_DATABASE_URL";
const ACCESS_KEY_ENV: &str = "STOCK_SHEET_ACCESS_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_url: String,
    /// Shared secret exchanged for a session token at login
    pub access_key: String,
    /// Origin the CORS layer allows (the trunk dev server by default)
    pub allowed_origin: String,
    /// Built frontend served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_url: "sqlite:stock_sheet.db".to_string(),
            access_key: "change-me".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load from `$STOCK_SHEET_CONFIG` (or `stock_sheet.yaml`), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a YAML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Apply overrides from a variable lookup (the process env in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_address = bind;
        }
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database_url = url;
        }
        if let Some(key) = lookup(ACCESS_KEY_ENV) {
            self.access_key = key;
        }
        if self.access_key == ServerConfig::default().access_key {
            warn!("Using the default access key; set {} before exposing the server", ACCESS_KEY_ENV);
        }
    }
}
