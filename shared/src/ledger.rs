//! Section totals and the closing-stock figure.

use serde::{Deserialize, Serialize};

use crate::sheet::{Section, StockSheet, StockSheetRow};

/// Derived totals for a sheet. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetTotals {
    pub opening: f64,
    pub purchase: f64,
    pub sales: f64,
    pub suspense: f64,
    /// opening + purchase - sales - suspense
    pub closing: f64,
}

impl SheetTotals {
    pub fn section(&self, section: Section) -> f64 {
        match section {
            Section::OpeningStock => self.opening,
            Section::Purchase => self.purchase,
            Section::Sales => self.sales,
            Section::Suspense => self.suspense,
        }
    }
}

pub fn section_total(rows: &[StockSheetRow]) -> f64 {
    rows.iter().map(|row| row.quantity).sum()
}

pub fn calculate_totals(sheet: &StockSheet) -> SheetTotals {
    let opening = section_total(&sheet.opening_stock);
    let purchase = section_total(&sheet.purchase);
    let sales = section_total(&sheet.sales);
    let suspense = section_total(&sheet.suspense);

    SheetTotals {
        opening,
        purchase,
        sales,
        suspense,
        closing: opening + purchase - sales - suspense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(quantities: &[f64]) -> Vec<StockSheetRow> {
        quantities
            .iter()
            .enumerate()
            .map(|(i, q)| StockSheetRow::new(format!("Row {}", i + 1), *q))
            .collect()
    }

    #[test]
    fn test_closing_stock_example() {
        let sheet = StockSheet {
            opening_stock: rows(&[10.0, 7.5]),
            purchase: rows(&[1.25, 2.0]),
            sales: rows(&[10.1]),
            suspense: rows(&[0.4]),
        };

        let totals = calculate_totals(&sheet);
        assert_eq!(totals.opening, 17.5);
        assert_eq!(totals.purchase, 3.25);
        assert!((totals.sales - 10.1).abs() < 1e-9);
        assert!((totals.suspense - 0.4).abs() < 1e-9);
        assert!((totals.closing - 10.25).abs() < 1e-9);
    }

    #[test]
    fn test_default_sheet_totals_are_zero() {
        let totals = calculate_totals(&StockSheet::default());
        assert_eq!(totals, SheetTotals::default());
    }

    #[test]
    fn test_negative_quantities_are_summed_as_is() {
        let sheet = StockSheet {
            opening_stock: rows(&[5.0]),
            purchase: rows(&[]),
            sales: rows(&[]),
            suspense: rows(&[-1.5]),
        };
        let totals = calculate_totals(&sheet);
        assert_eq!(totals.suspense, -1.5);
        assert_eq!(totals.closing, 6.5);
        assert_eq!(totals.section(Section::Suspense), -1.5);
    }
}
