/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("malformed stored document '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("connection lock poisoned")]
    LockPoisoned,
}
