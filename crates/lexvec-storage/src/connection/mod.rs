//! The single serialized connection a store instance owns.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, Transaction};

use lexvec_core::errors::{DocStoreResult, StorageError};

use self::pragmas::apply_pragmas;
use crate::to_storage_err;

/// One logical connection per store. Every statement goes through the
/// mutex, so writes never interleave with each other or with reads.
pub struct StoreConnection {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl StoreConnection {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> DocStoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, true)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> DocStoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, false)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Run a closure against the connection.
    pub fn with_conn<F, T>(&self, f: F) -> DocStoreResult<T>
    where
        F: FnOnce(&Connection) -> DocStoreResult<T>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&guard)
    }

    /// Run a closure inside a `BEGIN IMMEDIATE` transaction. Commits on
    /// `Ok`, rolls back on any `Err`.
    pub fn with_transaction<F, T>(&self, f: F) -> DocStoreResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> DocStoreResult<T>,
    {
        self.with_conn(|conn| writer::with_immediate_transaction(conn, f))
    }

    /// Database file path (`None` for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
