//! Note use-case service.
//!
//! # Responsibility
//! - Own the save lifecycle: blank rejection, insert-vs-update dispatch,
//!   save-timestamp stamping.
//! - Delegate persistence to the repository contract.
//!
//! # Invariants
//! - A blank note (title and content both empty after trimming) is never
//!   written; `save` reports `None` and leaves the store untouched.
//! - Every successful save, insert or update, refreshes the `date` column
//!   to the current local time.

use crate::model::note::{current_save_stamp, Note, UNSAVED_NOTE_ID};
use crate::repo::note_repo::{NoteRepository, RepoResult};
use log::debug;

/// Use-case service wrapper for note operations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves editor state, inserting or updating depending on `id`.
    ///
    /// # Contract
    /// - Title and content are trimmed before persistence.
    /// - Both fields empty: returns `Ok(None)`, nothing is written.
    /// - `id == UNSAVED_NOTE_ID`: inserts and returns the new row id.
    /// - Any other `id`: updates that row and returns the same id. A
    ///   missing id silently affects zero rows, matching the store
    ///   contract for update.
    pub fn save(&self, id: i64, title: &str, content: &str) -> RepoResult<Option<i64>> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            debug!("event=note_save module=service status=skipped reason=blank");
            return Ok(None);
        }

        let note = Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: current_save_stamp(),
        };

        if id == UNSAVED_NOTE_ID {
            let new_id = self.repo.insert(&note)?;
            debug!("event=note_save module=service status=ok op=insert note_id={new_id}");
            Ok(Some(new_id))
        } else {
            let changed = self.repo.update(&note)?;
            debug!(
                "event=note_save module=service status=ok op=update note_id={id} affected={changed}"
            );
            Ok(Some(id))
        }
    }

    /// Deletes the note with `id`; absent ids affect zero rows.
    pub fn delete(&self, id: i64) -> RepoResult<usize> {
        self.repo.delete_by_id(id)
    }

    /// Fetches one note by id.
    pub fn get(&self, id: i64) -> RepoResult<Option<Note>> {
        self.repo.fetch_by_id(id)
    }

    /// Lists every note in storage order.
    pub fn list(&self) -> RepoResult<Vec<Note>> {
        self.repo.fetch_all()
    }

    /// Substring search over title and content.
    pub fn search(&self, query: &str) -> RepoResult<Vec<Note>> {
        self.repo.search(query)
    }

    /// All notes, most recently saved first.
    pub fn list_by_date(&self) -> RepoResult<Vec<Note>> {
        self.repo.sort_by_date()
    }

    /// All notes, title ascending.
    pub fn list_by_title(&self) -> RepoResult<Vec<Note>> {
        self.repo.sort_by_title()
    }

    /// Renders a persisted note for the platform share sheet.
    ///
    /// Returns `None` when the id is absent.
    pub fn share_text(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self.repo.fetch_by_id(id)?.map(|note| note.share_text()))
    }
}
