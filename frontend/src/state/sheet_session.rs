//! Per-date session state machine.
//!
//! ```text
//! Idle → Loading → Loaded(Stored|Defaults) → Editing → Saving → Loaded(Stored)
//!                                                        ↘ Editing + save_error
//! ```
//!
//! Edits keep applying while a save is in flight. If any land, a successful
//! save ends in `Editing` since the sheet no longer matches what was sent.
//!
//! Loads and saves hand out tickets carrying a request id. A completion is
//! applied only when its ticket is the one currently pending; anything else
//! is a stale response and is dropped.

use shared::{calculate_totals, default_sheet, DateKey, SheetDefaults, SheetTotals, StockSheet};

use super::sheet_editor::{EditAction, EditError, SheetEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOrigin {
    /// Loaded from a saved snapshot (or just saved)
    Stored,
    /// Fresh default sheet: nothing saved, or the load failed
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Loaded(SheetOrigin),
    Editing,
    Saving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub date: DateKey,
    pub request_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    pub date: DateKey,
    pub request_id: u64,
    /// Flushed sheet to send
    pub sheet: StockSheet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSession {
    defaults: SheetDefaults,
    selected_date: Option<DateKey>,
    phase: SessionPhase,
    editor: SheetEditor,
    pending_load: Option<u64>,
    pending_save: Option<u64>,
    edited_during_save: bool,
    next_request_id: u64,
    save_error: Option<String>,
}

impl SheetSession {
    pub fn new(defaults: SheetDefaults) -> Self {
        Self {
            editor: SheetEditor::from_sheet(default_sheet(&defaults)),
            defaults,
            selected_date: None,
            phase: SessionPhase::Idle,
            pending_load: None,
            pending_save: None,
            edited_during_save: false,
            next_request_id: 1,
            save_error: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected_date(&self) -> Option<&DateKey> {
        self.selected_date.as_ref()
    }

    pub fn editor(&self) -> &SheetEditor {
        &self.editor
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// True while a load or save is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading | SessionPhase::Saving)
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn can_edit(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Loaded(_) | SessionPhase::Editing | SessionPhase::Saving
        )
    }

    fn issue_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Switch to `date`, discarding unsaved edits and any in-flight save.
    pub fn select_date(&mut self, date: DateKey) -> LoadTicket {
        let request_id = self.issue_request_id();
        self.selected_date = Some(date.clone());
        self.phase = SessionPhase::Loading;
        self.editor = SheetEditor::from_sheet(default_sheet(&self.defaults));
        self.pending_load = Some(request_id);
        self.pending_save = None;
        self.edited_during_save = false;
        self.save_error = None;
        LoadTicket { date, request_id }
    }

    /// Apply a load result. Returns false when the ticket is stale.
    pub fn complete_load(&mut self, ticket: &LoadTicket, sheet: StockSheet, origin: SheetOrigin) -> bool {
        if self.pending_load != Some(ticket.request_id) || self.selected_date.as_ref() != Some(&ticket.date) {
            return false;
        }
        self.pending_load = None;
        self.editor = SheetEditor::from_sheet(sheet);
        self.phase = SessionPhase::Loaded(origin);
        true
    }

    /// Run an edit against the table. Ignored while loading.
    pub fn edit(&mut self, action: EditAction) -> Result<(), EditError> {
        if !self.can_edit() {
            return Ok(());
        }
        self.editor.apply(action)?;
        if self.phase == SessionPhase::Saving {
            self.edited_during_save = true;
        } else {
            self.phase = SessionPhase::Editing;
        }
        Ok(())
    }

    /// Flush every table and hand out the sheet to send. `None` while a load
    /// or another save is running.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if !matches!(self.phase, SessionPhase::Loaded(_) | SessionPhase::Editing) {
            return None;
        }
        let date = self.selected_date.clone()?;

        self.editor.flush_all();
        let request_id = self.issue_request_id();
        self.pending_save = Some(request_id);
        self.phase = SessionPhase::Saving;
        self.edited_during_save = false;
        self.save_error = None;

        Some(SaveTicket {
            date,
            request_id,
            sheet: self.editor.to_sheet(),
        })
    }

    /// Apply a save result. Returns false when the ticket is stale.
    ///
    /// A failed save keeps the edits and records the error for display.
    pub fn complete_save(&mut self, ticket: &SaveTicket, result: Result<(), String>) -> bool {
        if self.pending_save != Some(ticket.request_id) || self.selected_date.as_ref() != Some(&ticket.date) {
            return false;
        }
        self.pending_save = None;
        let edited = std::mem::take(&mut self.edited_during_save);
        match result {
            Ok(()) if edited => self.phase = SessionPhase::Editing,
            Ok(()) => self.phase = SessionPhase::Loaded(SheetOrigin::Stored),
            Err(e) => {
                self.phase = SessionPhase::Editing;
                self.save_error = Some(e);
            }
        }
        true
    }

    pub fn dismiss_error(&mut self) {
        self.save_error = None;
    }

    /// Flush open cells and return the sheet as it stands, e.g. for export.
    pub fn flushed_sheet(&mut self) -> StockSheet {
        self.editor.flush_all();
        self.editor.to_sheet()
    }

    /// Totals over committed values.
    pub fn totals(&self) -> SheetTotals {
        calculate_totals(&self.editor.to_sheet())
    }
}
