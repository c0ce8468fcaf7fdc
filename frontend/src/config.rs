use shared::SheetDefaults;

/// Client settings fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Origin of the REST server, without a trailing slash
    pub api_base_url: String,
    pub sheet_defaults: SheetDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("STOCK_SHEET_API_URL")
                .unwrap_or("http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            sheet_defaults: SheetDefaults::default(),
        }
    }
}
