use serde::{Deserialize, Serialize};

pub mod date_key;
pub mod defaults;
pub mod export;
pub mod ledger;
pub mod number_format;
pub mod record;
pub mod sheet;

pub use date_key::{DateKey, DateKeyError};
pub use defaults::{default_rows, default_sheet, SheetDefaults};
pub use export::{export_file_name, render_csv};
pub use ledger::{calculate_totals, section_total, SheetTotals};
pub use number_format::{
    format_number, is_valid_intermediate_input, normalize_to_three_decimals, parse_number,
    round_to_three_decimals,
};
pub use record::{RecordShapeError, SnapshotRecord};
pub use sheet::{Section, StockSheet, StockSheetRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub access_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent snapshot calls
    pub token: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDatesResponse {
    /// Saved date keys, ascending
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshotResponse {
    pub date: String,
    pub success_message: String,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// A log line forwarded from the browser to the server log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}
