use serde::{Deserialize, Serialize};

/// One editable line of a section: a free-text name and a committed quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSheetRow {
    /// Item or party name; may be empty while the user is still typing
    pub name: String,
    /// Quantity with three fractional digits once committed
    pub quantity: f64,
}

impl StockSheetRow {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// A fresh row appended by "Add Row".
    pub fn blank() -> Self {
        Self::new(String::new(), 0.0)
    }
}

/// The four row groups of a daily stock sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    OpeningStock,
    Purchase,
    Sales,
    Suspense,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::OpeningStock,
        Section::Purchase,
        Section::Sales,
        Section::Suspense,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::OpeningStock => "Opening Stock",
            Section::Purchase => "Purchase",
            Section::Sales => "Sales",
            Section::Suspense => "Suspense",
        }
    }

    pub fn total_label(self) -> &'static str {
        match self {
            Section::OpeningStock => "Total Opening Stock",
            Section::Purchase => "Total Purchase",
            Section::Sales => "Total Sales",
            Section::Suspense => "Total Suspense",
        }
    }

    pub fn name_label(self) -> &'static str {
        match self {
            Section::OpeningStock => "Item Name",
            _ => "Party Name",
        }
    }

    pub fn quantity_label(self) -> &'static str {
        match self {
            Section::OpeningStock => "Weight / Quantity",
            _ => "Quantity",
        }
    }

    /// Number of rows a fresh sheet starts with.
    pub fn conceptual_len(self) -> usize {
        match self {
            Section::OpeningStock => 7,
            _ => 10,
        }
    }

    /// Placeholder name for the row at zero-based `index`, e.g. "Item 1".
    pub fn placeholder_name(self, index: usize) -> String {
        match self {
            Section::OpeningStock => format!("Item {}", index + 1),
            _ => format!("Party {}", index + 1),
        }
    }
}

/// A full daily sheet: four ordered row lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSheet {
    pub opening_stock: Vec<StockSheetRow>,
    pub purchase: Vec<StockSheetRow>,
    pub sales: Vec<StockSheetRow>,
    pub suspense: Vec<StockSheetRow>,
}

impl StockSheet {
    pub fn rows(&self, section: Section) -> &[StockSheetRow] {
        match section {
            Section::OpeningStock => &self.opening_stock,
            Section::Purchase => &self.purchase,
            Section::Sales => &self.sales,
            Section::Suspense => &self.suspense,
        }
    }

    pub fn rows_mut(&mut self, section: Section) -> &mut Vec<StockSheetRow> {
        match section {
            Section::OpeningStock => &mut self.opening_stock,
            Section::Purchase => &mut self.purchase,
            Section::Sales => &mut self.sales,
            Section::Suspense => &mut self.suspense,
        }
    }
}

impl Default for StockSheet {
    fn default() -> Self {
        crate::defaults::default_sheet(&crate::defaults::SheetDefaults::default())
    }
}
