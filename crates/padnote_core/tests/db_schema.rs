use padnote_core::db::schema::{current_user_version, SCHEMA_VERSION};
use padnote_core::db::{open_db, open_db_in_memory};
use padnote_core::{Note, NoteRepository, SqliteNoteRepository, UNSAVED_NOTE_ID};
use rusqlite::Connection;
use tempfile::TempDir;

fn sample_note() -> Note {
    Note {
        id: UNSAVED_NOTE_ID,
        title: "kept?".to_string(),
        content: "only across same-version reopens".to_string(),
        date: "2024-01-01 10:00".to_string(),
    }
}

#[test]
fn fresh_open_creates_table_and_stamps_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);

    // Table must be usable immediately after open.
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let id = repo.insert(&sample_note()).unwrap();
    assert!(repo.fetch_by_id(id).unwrap().is_some());
}

#[test]
fn reopen_at_same_version_preserves_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("notes.sqlite3");

    let id = {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        repo.insert(&sample_note()).unwrap()
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let loaded = repo.fetch_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.content, "only across same-version reopens");
}

#[test]
fn version_mismatch_drops_and_recreates_the_table() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("notes.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        repo.insert(&sample_note()).unwrap();
    }

    // Simulate a store stamped by a different app version.
    {
        let raw = Connection::open(&db_path).unwrap();
        raw.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert!(repo.fetch_all().unwrap().is_empty(), "upgrade is destructive");
}

#[test]
fn newer_stamp_is_also_recreated_destructively() {
    // Policy applies to any mismatch, older or newer; there is no
    // read-only fallback for stores written by a later version.
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("notes.sqlite3");

    {
        let raw = Connection::open(&db_path).unwrap();
        raw.execute_batch(
            "CREATE TABLE notes (_id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, content TEXT, date TEXT, extra TEXT);
             PRAGMA user_version = 2;",
        )
        .unwrap();
        raw.execute(
            "INSERT INTO notes (title, content, date, extra) VALUES ('a', 'b', 'c', 'd');",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert!(repo.fetch_all().unwrap().is_empty());

    // The extra column from the foreign layout is gone as well.
    let columns: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(columns, 4);
}
