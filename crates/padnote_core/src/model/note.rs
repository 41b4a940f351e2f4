//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record (id, title, content, date).
//! - Provide draft construction and save-timestamp helpers.
//!
//! # Invariants
//! - `id` is assigned by the store on first insert and never changes.
//! - `date` holds the last-saved local time in `yyyy-MM-dd HH:mm` form,
//!   not a creation timestamp.
//! - A note whose title and content are both empty is never persisted.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Row id sentinel for a note that has not been persisted yet.
pub const UNSAVED_NOTE_ID: i64 = -1;

/// Save-timestamp layout. Lexicographic order on this fixed-width format
/// coincides with chronological order, which `sort_by_date` relies on.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The sole persisted entity: a short text note.
///
/// Both `title` and `content` may be empty individually; only a note with
/// both empty is rejected by the save path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned row id, or `UNSAVED_NOTE_ID` for in-memory drafts.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Last-saved stamp in `DATE_FORMAT`; empty for unsaved drafts.
    pub date: String,
}

impl Note {
    /// Creates an in-memory draft that has never been saved.
    pub fn draft(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_NOTE_ID,
            title: title.into(),
            content: content.into(),
            date: String::new(),
        }
    }

    /// Returns whether this note has been persisted at least once.
    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_NOTE_ID
    }

    /// Returns whether both fields are empty after trimming.
    ///
    /// Blank notes are skipped by the save path, so this is the gate the
    /// service checks before touching the store.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Renders the note as plain text for the platform share sheet.
    ///
    /// Layout: title line, blank separator, content. Either part is
    /// omitted when empty.
    pub fn share_text(&self) -> String {
        match (self.title.is_empty(), self.content.is_empty()) {
            (false, false) => format!("{}\n\n{}", self.title, self.content),
            (false, true) => self.title.clone(),
            (true, _) => self.content.clone(),
        }
    }
}

/// Formats the current local time as a save stamp.
///
/// Called once per save so insert and update both refresh the `date`
/// column to "now".
pub fn current_save_stamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}
