//! CSV rendering of a sheet for download.

use crate::date_key::DateKey;
use crate::ledger::SheetTotals;
use crate::number_format::format_number;
use crate::sheet::{Section, StockSheet};

pub const EXPORT_TITLE: &str = "Stock Calculation Sheet";

/// `stock-calculation-2024-03-10.csv`
pub fn export_file_name(date: &DateKey) -> String {
    format!("stock-calculation-{}.csv", date)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the sheet as CSV lines joined with `\n`.
pub fn render_csv(sheet: &StockSheet, totals: &SheetTotals, date: &DateKey) -> String {
    let mut lines: Vec<String> = vec![
        EXPORT_TITLE.to_string(),
        format!("Date: {}", date),
        String::new(),
    ];

    for section in Section::ALL {
        lines.push(section.title().to_string());
        lines.push(format!("{},{}", section.name_label(), section.quantity_label()));
        for row in sheet.rows(section) {
            lines.push(format!("{},{}", quote(&row.name), format_number(row.quantity)));
        }
        lines.push(format!(
            "{},{}",
            section.total_label(),
            format_number(totals.section(section))
        ));
        lines.push(String::new());
    }

    lines.push("Final Calculation".to_string());
    lines.push("Description,Value".to_string());
    lines.push(format!("Opening Stock,{}", format_number(totals.opening)));
    lines.push(format!("Purchase,{}", format_number(totals.purchase)));
    lines.push(format!("Sales,{}", format_number(totals.sales)));
    lines.push(format!("Suspense,{}", format_number(totals.suspense)));
    lines.push(format!("Closing Stock,{}", format_number(totals.closing)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::calculate_totals;
    use crate::sheet::StockSheetRow;

    fn sheet() -> StockSheet {
        StockSheet {
            opening_stock: vec![
                StockSheetRow::new("Gold \"24k\"", 10.0),
                StockSheetRow::new("Silver, bars", 7.5),
            ],
            purchase: vec![StockSheetRow::new("Party 1", 3.25)],
            sales: vec![StockSheetRow::new("Party 1", 10.1)],
            suspense: vec![StockSheetRow::new("Party 1", 0.4)],
        }
    }

    #[test]
    fn test_file_name() {
        let date = DateKey::parse("2024-03-10").unwrap();
        assert_eq!(export_file_name(&date), "stock-calculation-2024-03-10.csv");
    }

    #[test]
    fn test_render_csv_layout() {
        let sheet = sheet();
        let date = DateKey::parse("2024-03-10").unwrap();
        let csv = render_csv(&sheet, &calculate_totals(&sheet), &date);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines[0], "Stock Calculation Sheet");
        assert_eq!(lines[1], "Date: 2024-03-10");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Opening Stock");
        assert_eq!(lines[4], "Item Name,Weight / Quantity");
        assert_eq!(lines[5], "\"Gold \"\"24k\"\"\",10.000");
        assert_eq!(lines[6], "\"Silver, bars\",7.500");
        assert_eq!(lines[7], "Total Opening Stock,17.500");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Purchase");
        assert_eq!(lines[10], "Party Name,Quantity");
        assert_eq!(*lines.last().unwrap(), "Closing Stock,10.250");
    }

    #[test]
    fn test_render_csv_final_block() {
        let sheet = sheet();
        let date = DateKey::parse("2024-03-10").unwrap();
        let csv = render_csv(&sheet, &calculate_totals(&sheet), &date);
        let tail: Vec<&str> = csv.split('\n').rev().take(7).collect::<Vec<_>>().into_iter().rev().collect();
        assert_eq!(
            tail,
            vec![
                "Final Calculation",
                "Description,Value",
                "Opening Stock,17.500",
                "Purchase,3.250",
                "Sales,10.100",
                "Suspense,0.400",
                "Closing Stock,10.250",
            ]
        );
    }
}
