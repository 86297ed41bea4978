//! Versioned schema migrations tracked in `PRAGMA user_version`.

pub mod v001_documents;

use rusqlite::Connection;
use tracing::info;

use lexvec_core::errors::{DocStoreResult, StorageError};

use crate::to_storage_err;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_documents::MIGRATION_SQL)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> DocStoreResult<()> {
    let current = schema_version(conn)?;
    for &(version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        conn.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        info!(version, "applied migration");
    }
    Ok(())
}

pub fn schema_version(conn: &Connection) -> DocStoreResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
