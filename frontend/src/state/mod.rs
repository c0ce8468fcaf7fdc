//! Client-side sheet state, independent of the DOM.

pub mod sheet_editor;
pub mod sheet_session;

pub use sheet_editor::{EditAction, EditError, EditingCell, SectionEditor, SheetEditor};
pub use sheet_session::{LoadTicket, SaveTicket, SessionPhase, SheetOrigin, SheetSession};
