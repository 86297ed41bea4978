//! # lexvec-storage
//!
//! SQLite-backed document store. Owns the canonical `document` relation,
//! the derived lexical (FTS5) and vector indexes kept in sync by triggers,
//! the filter compiler, and the ranked retrieval query builder.

pub mod codec;
pub mod connection;
pub mod engine;
pub mod filters;
pub mod indexes;
pub mod migrations;
pub mod queries;
pub mod retrieval;

pub use engine::StorageEngine;
pub use filters::{compile, CompiledPredicate};

use lexvec_core::errors::{DocStoreError, StorageError};

/// Wrap an SQLite failure message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> DocStoreError {
    DocStoreError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}
