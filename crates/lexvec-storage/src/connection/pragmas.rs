//! PRAGMA configuration applied when a connection opens.
//!
//! NORMAL sync, 64MB cache, 5s busy_timeout, foreign_keys ON.
//! File-backed databases additionally switch to WAL.

use rusqlite::Connection;
use tracing::debug;

use lexvec_core::errors::DocStoreResult;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection, file_backed: bool) -> DocStoreResult<()> {
    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if file_backed {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))?;
        debug!(journal_mode = %mode, "journal mode set");
    }
    Ok(())
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> DocStoreResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
