//! Editable table state.
//!
//! Each section keeps its committed rows plus at most one quantity cell being
//! edited. The cell's raw buffer only reaches the row through
//! `normalize_to_three_decimals`, on blur, on Enter or on an explicit flush.

use shared::{
    format_number, is_valid_intermediate_input, normalize_to_three_decimals, Section, StockSheet,
    StockSheetRow,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("A section must keep at least one row")]
    LastRow,
    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),
}

/// The quantity cell that currently has focus.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingCell {
    pub row: usize,
    /// Raw uncommitted text
    pub buffer: String,
}

/// User intents coming from a section table.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    FocusQuantity { section: Section, row: usize },
    InputQuantity { section: Section, value: String },
    CommitQuantity { section: Section },
    EnterQuantity { section: Section },
    SetName { section: Section, row: usize, name: String },
    AddRow { section: Section },
    DeleteRow { section: Section, row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionEditor {
    section: Section,
    rows: Vec<StockSheetRow>,
    editing: Option<EditingCell>,
}

impl SectionEditor {
    pub fn new(section: Section, rows: Vec<StockSheetRow>) -> Self {
        Self {
            section,
            rows,
            editing: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn rows(&self) -> &[StockSheetRow] {
        &self.rows
    }

    pub fn editing(&self) -> Option<&EditingCell> {
        self.editing.as_ref()
    }

    /// Start editing a quantity cell, committing any other open cell first.
    ///
    /// A zero quantity opens with an empty buffer so the placeholder shows.
    pub fn focus_quantity(&mut self, row: usize) -> Result<(), EditError> {
        let quantity = self.rows.get(row).ok_or(EditError::RowOutOfRange(row))?.quantity;
        if self.editing.as_ref().map(|cell| cell.row) == Some(row) {
            return Ok(());
        }
        self.commit_quantity();

        let buffer = if quantity == 0.0 {
            String::new()
        } else {
            format_number(quantity)
        };
        self.editing = Some(EditingCell { row, buffer });
        Ok(())
    }

    /// Replace the buffer if `value` is a valid partial number. Returns
    /// whether the keystroke was accepted.
    pub fn input_quantity(&mut self, value: &str) -> bool {
        match self.editing.as_mut() {
            Some(cell) if is_valid_intermediate_input(value) => {
                cell.buffer = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Normalize the open buffer into its row and close the cell.
    pub fn commit_quantity(&mut self) {
        if let Some(cell) = self.editing.take() {
            if let Some(row) = self.rows.get_mut(cell.row) {
                row.quantity = normalize_to_three_decimals(&cell.buffer);
            }
        }
    }

    /// Commit, and append a fresh row when Enter is pressed on the last one.
    /// Returns whether a row was appended.
    pub fn enter_quantity(&mut self) -> bool {
        let on_last_row = match &self.editing {
            Some(cell) => cell.row + 1 == self.rows.len(),
            None => false,
        };
        self.commit_quantity();
        if on_last_row {
            self.add_row();
        }
        on_last_row
    }

    pub fn set_name(&mut self, row: usize, name: &str) -> Result<(), EditError> {
        let target = self.rows.get_mut(row).ok_or(EditError::RowOutOfRange(row))?;
        target.name = name.to_string();
        Ok(())
    }

    pub fn add_row(&mut self) {
        self.rows.push(StockSheetRow::blank());
    }

    /// Remove exactly one row, keeping the order of the rest.
    pub fn delete_row(&mut self, row: usize) -> Result<(), EditError> {
        if row >= self.rows.len() {
            return Err(EditError::RowOutOfRange(row));
        }
        if self.rows.len() == 1 {
            return Err(EditError::LastRow);
        }

        self.rows.remove(row);
        self.editing = match self.editing.take() {
            Some(cell) if cell.row == row => None,
            Some(cell) if cell.row > row => Some(EditingCell {
                row: cell.row - 1,
                buffer: cell.buffer,
            }),
            other => other,
        };
        Ok(())
    }

    pub fn flush(&mut self) {
        self.commit_quantity();
    }

    /// Text shown in a quantity cell: the raw buffer while focused,
    /// otherwise the committed value.
    pub fn display_quantity(&self, row: usize) -> String {
        match &self.editing {
            Some(cell) if cell.row == row => cell.buffer.clone(),
            _ => self
                .rows
                .get(row)
                .map(|r| format_number(r.quantity))
                .unwrap_or_default(),
        }
    }
}

/// The four section editors of one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetEditor {
    opening_stock: SectionEditor,
    purchase: SectionEditor,
    sales: SectionEditor,
    suspense: SectionEditor,
}

impl SheetEditor {
    pub fn from_sheet(sheet: StockSheet) -> Self {
        Self {
            opening_stock: SectionEditor::new(Section::OpeningStock, sheet.opening_stock),
            purchase: SectionEditor::new(Section::Purchase, sheet.purchase),
            sales: SectionEditor::new(Section::Sales, sheet.sales),
            suspense: SectionEditor::new(Section::Suspense, sheet.suspense),
        }
    }

    pub fn section(&self, section: Section) -> &SectionEditor {
        match section {
            Section::OpeningStock => &self.opening_stock,
            Section::Purchase => &self.purchase,
            Section::Sales => &self.sales,
            Section::Suspense => &self.suspense,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut SectionEditor {
        match section {
            Section::OpeningStock => &mut self.opening_stock,
            Section::Purchase => &mut self.purchase,
            Section::Sales => &mut self.sales,
            Section::Suspense => &mut self.suspense,
        }
    }

    /// Commit every open buffer. Must run before the sheet is serialized.
    pub fn flush_all(&mut self) {
        for section in Section::ALL {
            self.section_mut(section).flush();
        }
    }

    /// Committed rows only; open buffers are not included.
    pub fn to_sheet(&self) -> StockSheet {
        StockSheet {
            opening_stock: self.opening_stock.rows.clone(),
            purchase: self.purchase.rows.clone(),
            sales: self.sales.rows.clone(),
            suspense: self.suspense.rows.clone(),
        }
    }

    pub fn apply(&mut self, action: EditAction) -> Result<(), EditError> {
        match action {
            EditAction::FocusQuantity { section, row } => self.section_mut(section).focus_quantity(row),
            EditAction::InputQuantity { section, value } => {
                self.section_mut(section).input_quantity(&value);
                Ok(())
            }
            EditAction::CommitQuantity { section } => {
                self.section_mut(section).commit_quantity();
                Ok(())
            }
            EditAction::EnterQuantity { section } => {
                self.section_mut(section).enter_quantity();
                Ok(())
            }
            EditAction::SetName { section, row, name } => self.section_mut(section).set_name(row, &name),
            EditAction::AddRow { section } => {
                self.section_mut(section).add_row();
                Ok(())
            }
            EditAction::DeleteRow { section, row } => self.section_mut(section).delete_row(row),
        }
    }
}
