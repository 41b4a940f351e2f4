//! Notes schema definition and destructive version policy.
//!
//! # Responsibility
//! - Create the `notes` table on fresh stores.
//! - Resolve `PRAGMA user_version` mismatches by drop-and-recreate.
//!
//! # Invariants
//! - `user_version` equals `SCHEMA_VERSION` after `ensure_schema` returns Ok.
//! - Recreate runs inside one transaction; a failed recreate leaves the
//!   previous state untouched.

use crate::db::DbResult;
use log::{info, warn};
use rusqlite::Connection;

/// Schema version compiled into this binary. Any stamped value that
/// differs, older or newer, triggers the destructive recreate.
pub const SCHEMA_VERSION: u32 = 1;

const NOTES_DDL: &str = include_str!("notes.sql");

/// Ensures the notes table exists at `SCHEMA_VERSION`.
///
/// Fresh stores (`user_version = 0`) are created in place. Stores stamped
/// with any other version are dropped and recreated, losing all rows.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let stamped = current_user_version(conn)?;
    if stamped == SCHEMA_VERSION {
        return Ok(());
    }

    if stamped != 0 {
        warn!(
            "event=schema_recreate module=db status=start stamped_version={stamped} \
             compiled_version={SCHEMA_VERSION} note=all_rows_dropped"
        );
    }

    let tx = conn.transaction()?;
    tx.execute_batch("DROP TABLE IF EXISTS notes;")?;
    tx.execute_batch(NOTES_DDL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!(
        "event=schema_ready module=db status=ok version={SCHEMA_VERSION} fresh={}",
        stamped == 0
    );
    Ok(())
}

/// Reads the stamped schema version from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
