use serde::{Deserialize, Serialize};

use crate::sheet::{Section, StockSheet, StockSheetRow};

/// Knobs for the sheet shown when a date has no snapshot yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDefaults {
    /// Quantity given to every placeholder row of a fresh sheet
    pub placeholder_quantity: f64,
}

impl Default for SheetDefaults {
    fn default() -> Self {
        Self {
            placeholder_quantity: 0.0,
        }
    }
}

/// Placeholder rows for one section of a fresh sheet.
pub fn default_rows(section: Section, defaults: &SheetDefaults) -> Vec<StockSheetRow> {
    (0..section.conceptual_len())
        .map(|i| StockSheetRow::new(section.placeholder_name(i), defaults.placeholder_quantity))
        .collect()
}

/// A fresh sheet: 7 opening-stock items and 10 parties in every other section.
pub fn default_sheet(defaults: &SheetDefaults) -> StockSheet {
    StockSheet {
        opening_stock: default_rows(Section::OpeningStock, defaults),
        purchase: default_rows(Section::Purchase, defaults),
        sales: default_rows(Section::Sales, defaults),
        suspense: default_rows(Section::Suspense, defaults),
    }
}
