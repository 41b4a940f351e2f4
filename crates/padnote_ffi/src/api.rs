//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level note operations to Dart via FRB.
//! - Keep error semantics simple for the UI shell: envelopes, not panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens its own connection and drops it before returning;
//!   no handle is shared with the UI side.
//! - `note_id = -1` is the sentinel for "not yet persisted" on input and
//!   for "nothing was persisted" on output.

use padnote_core::db::open_db;
use padnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteService, SqliteNoteRepository, UNSAVED_NOTE_ID,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const NOTES_DB_FILE_NAME: &str = "padnote.sqlite3";
static NOTES_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Snapshot of one note for UI rendering.
///
/// The UI holds these as transient view state only; the store stays the
/// single source of truth and lists are re-fetched per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Last-saved stamp, `yyyy-MM-dd HH:mm`.
    pub date: String,
}

/// Generic action response envelope for note command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Persisted note id, or `-1` when nothing was persisted.
    pub note_id: i64,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Response envelope for list-shaped queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Result snapshot (empty on miss or failure).
    pub items: Vec<NoteView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Response envelope for single-note lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    /// The note, when the id exists.
    pub note: Option<NoteView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: i64) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: UNSAVED_NOTE_ID,
            message: message.into(),
        }
    }
}

/// Saves editor state; `id = -1` means "not yet persisted".
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Blank input (title and content both empty) is a silent no-op with
///   `ok = true` and `note_id = -1`.
#[flutter_rust_bridge::frb(sync)]
pub fn save_note(id: i64, title: String, content: String) -> NoteActionResponse {
    match with_note_service(|service| service.save(id, &title, &content)) {
        Ok(Some(note_id)) => NoteActionResponse::success("Note saved.", note_id),
        Ok(None) => NoteActionResponse::success("Empty note discarded.", UNSAVED_NOTE_ID),
        Err(err) => NoteActionResponse::failure(format!("save_note failed: {err}")),
    }
}

/// Deletes a note; a missing id is a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_note(id: i64) -> NoteActionResponse {
    match with_note_service(|service| service.delete(id)) {
        Ok(1) => NoteActionResponse::success("Note deleted.", id),
        Ok(_) => NoteActionResponse::success("Nothing to delete.", id),
        Err(err) => NoteActionResponse::failure(format!("delete_note failed: {err}")),
    }
}

/// Fetches one note for the editor screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; absent id yields `note = None`.
#[flutter_rust_bridge::frb(sync)]
pub fn get_note(id: i64) -> NoteDetailResponse {
    match with_note_service(|service| service.get(id)) {
        Ok(Some(note)) => NoteDetailResponse {
            note: Some(to_note_view(note)),
            message: "Note loaded.".to_string(),
        },
        Ok(None) => NoteDetailResponse {
            note: None,
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteDetailResponse {
            note: None,
            message: format!("get_note failed: {err}"),
        },
    }
}

/// Lists every note in storage order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notes() -> NoteListResponse {
    list_response("list_notes", |service| service.list())
}

/// Substring search over title and content; empty query matches all.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; the query text is accepted verbatim.
#[flutter_rust_bridge::frb(sync)]
pub fn search_notes(query: String) -> NoteListResponse {
    list_response("search_notes", |service| service.search(&query))
}

/// Lists notes most recently saved first.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notes_by_date() -> NoteListResponse {
    list_response("list_notes_by_date", |service| service.list_by_date())
}

/// Lists notes by title, ascending.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notes_by_title() -> NoteListResponse {
    list_response("list_notes_by_title", |service| service.list_by_title())
}

/// Renders a note as plain text for the platform share sheet.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; absent id yields `ok = false` with an explanatory
///   message and empty text.
#[flutter_rust_bridge::frb(sync)]
pub fn share_note_text(id: i64) -> NoteShareResponse {
    match with_note_service(|service| service.share_text(id)) {
        Ok(Some(text)) => NoteShareResponse {
            ok: true,
            text,
            message: "Share text ready.".to_string(),
        },
        Ok(None) => NoteShareResponse {
            ok: false,
            text: String::new(),
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteShareResponse {
            ok: false,
            text: String::new(),
            message: format!("share_note_text failed: {err}"),
        },
    }
}

/// Response envelope for share-sheet rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteShareResponse {
    pub ok: bool,
    /// Plain-text rendering (title line, blank line, content).
    pub text: String,
    pub message: String,
}

fn list_response(
    op: &str,
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> padnote_core::RepoResult<Vec<Note>>,
) -> NoteListResponse {
    match with_note_service(f) {
        Ok(notes) => {
            let message = if notes.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", notes.len())
            };
            NoteListResponse {
                items: notes.into_iter().map(to_note_view).collect(),
                message,
            }
        }
        Err(err) => NoteListResponse {
            items: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn resolve_notes_db_path() -> PathBuf {
    NOTES_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PADNOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(NOTES_DB_FILE_NAME)
        })
        .clone()
}

fn with_note_service<T>(
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> padnote_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_notes_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("notes DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&conn)
        .map_err(|err| format!("notes repo init failed: {err}"))?;
    let service = NoteService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_note_view(note: Note) -> NoteView {
    NoteView {
        id: note.id,
        title: note.title,
        content: note.content,
        date: note.date,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, delete_note, get_note, init_logging, list_notes, list_notes_by_date,
        list_notes_by_title, ping, save_note, search_notes, share_note_text,
    };
    use std::sync::{Mutex, PoisonError};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Tests share one per-process db file and the core opens connections
    // without a busy timeout, so db-touching tests run serialized.
    static DB_LOCK: Mutex<()> = Mutex::new(());

    fn db_guard() -> std::sync::MutexGuard<'static, ()> {
        DB_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn save_blank_note_is_a_no_op() {
        let _guard = db_guard();
        let response = save_note(-1, "  ".to_string(), String::new());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.note_id, -1);
    }

    #[test]
    fn save_get_search_delete_roundtrip() {
        let _guard = db_guard();
        let token = unique_token("ffi-roundtrip");
        let saved = save_note(-1, token.clone(), "body".to_string());
        assert!(saved.ok, "{}", saved.message);
        assert!(saved.note_id > 0);

        let detail = get_note(saved.note_id);
        let note = detail.note.expect("saved note should load");
        assert_eq!(note.title, token);
        assert_eq!(note.date.len(), 16);

        let hits = search_notes(token.clone());
        assert!(hits.items.iter().any(|item| item.id == saved.note_id));

        let all = list_notes();
        assert!(all.items.iter().any(|item| item.id == saved.note_id));

        let share = share_note_text(saved.note_id);
        assert!(share.ok, "{}", share.message);
        assert!(share.text.starts_with(&token));

        let deleted = delete_note(saved.note_id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(get_note(saved.note_id).note.is_none());
    }

    #[test]
    fn save_note_stamps_fixed_format_date_column() {
        let _guard = db_guard();
        let token = unique_token("ffi-date");
        let saved = save_note(-1, token, String::new());
        assert!(saved.ok, "{}", saved.message);

        let conn = padnote_core::db::open_db(super::resolve_notes_db_path()).expect("open db");
        let date: String = conn
            .query_row(
                "SELECT date FROM notes WHERE _id = ?1",
                rusqlite::params![saved.note_id],
                |row| row.get(0),
            )
            .expect("query note row");
        assert_eq!(date.len(), 16);
        assert_eq!(&date[10..11], " ");
    }

    #[test]
    fn delete_missing_note_reports_nothing_to_delete() {
        let _guard = db_guard();
        let response = delete_note(i64::MAX - 7);
        assert!(response.ok, "{}", response.message);
        assert!(response.message.contains("Nothing"));
    }

    #[test]
    fn title_sorted_listing_includes_created_notes() {
        let _guard = db_guard();
        let token = unique_token("ffi-sorted");
        let saved = save_note(-1, token.clone(), String::new());
        assert!(saved.ok, "{}", saved.message);

        let by_title = list_notes_by_title();
        assert!(by_title.items.iter().any(|item| item.title == token));

        let by_date = list_notes_by_date();
        assert!(by_date.items.iter().any(|item| item.title == token));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
