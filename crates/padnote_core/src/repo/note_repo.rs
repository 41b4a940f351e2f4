//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and query APIs over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each operation is a single statement against the caller's connection.
//! - `update`/`delete_by_id` on an absent id return `Ok(0)`, silently.
//! - NULL text cells read back as empty strings (the schema carries no
//!   NOT NULL constraints).

use crate::db::schema::{current_user_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::note::Note;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT _id, title, content, date FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection was handed over without the notes schema in place.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open via db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD and query operations.
pub trait NoteRepository {
    /// Inserts one row and returns the generated row id.
    fn insert(&self, note: &Note) -> RepoResult<i64>;
    /// Updates the row matching `note.id`; returns the affected count.
    fn update(&self, note: &Note) -> RepoResult<usize>;
    /// Deletes at most one row; returns the affected count.
    fn delete_by_id(&self, id: i64) -> RepoResult<usize>;
    /// Returns every row in storage order (no ORDER BY).
    fn fetch_all(&self) -> RepoResult<Vec<Note>>;
    /// Returns the row matching `id`, or `None` when absent.
    fn fetch_by_id(&self, id: i64) -> RepoResult<Option<Note>>;
    /// Substring match on title or content; empty query matches all rows.
    fn search(&self, query: &str) -> RepoResult<Vec<Note>>;
    /// All rows, `date` descending (lexicographic on the fixed format).
    fn sort_by_date(&self) -> RepoResult<Vec<Note>>;
    /// All rows, `title` ascending.
    fn sort_by_title(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository borrowing the caller's connection.
#[derive(Debug)]
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection after verifying the notes schema is in place.
    ///
    /// Rejects connections whose `user_version` does not match the
    /// compiled schema version, which catches callers bypassing
    /// `db::open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        if actual_version != SCHEMA_VERSION {
            return Err(RepoError::UninitializedConnection {
                expected_version: SCHEMA_VERSION,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, note: &Note) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO notes (title, content, date) VALUES (?1, ?2, ?3);",
            params![note.title.as_str(), note.content.as_str(), note.date.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, date = ?3 WHERE _id = ?4;",
            params![
                note.title.as_str(),
                note.content.as_str(),
                note.date.as_str(),
                note.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_by_id(&self, id: i64) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE _id = ?1;", params![id])?;
        Ok(changed)
    }

    fn fetch_all(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!("{NOTE_SELECT_SQL};"))?;
        let notes = collect_notes(stmt.query([])?);
        notes
    }

    fn fetch_by_id(&self, id: i64) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE _id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Note>> {
        // Query text lands verbatim inside the pattern; `%`/`_` act as
        // wildcards and an empty query degenerates to `%%` (match all).
        // SQLite's default LIKE is case-insensitive for ASCII.
        let pattern = format!("%{query}%");
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE title LIKE ?1 OR content LIKE ?1;"
        ))?;
        let notes = collect_notes(stmt.query(params![pattern])?);
        notes
    }

    fn sort_by_date(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY date DESC;"))?;
        let notes = collect_notes(stmt.query([])?);
        notes
    }

    fn sort_by_title(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY title ASC;"))?;
        let notes = collect_notes(stmt.query([])?);
        notes
    }
}

fn collect_notes(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Note>> {
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }
    Ok(notes)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    Ok(Note {
        id: row.get("_id")?,
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        content: row.get::<_, Option<String>>("content")?.unwrap_or_default(),
        date: row.get::<_, Option<String>>("date")?.unwrap_or_default(),
    })
}
