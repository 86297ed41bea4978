//! Derived indexes. Each one is created on demand from the store config,
//! maintained by triggers inside the writing transaction, and can be
//! rebuilt from the canonical relation at any time.

pub mod lexical;
pub mod vector;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use lexvec_core::config::DocumentStoreConfig;
use lexvec_core::errors::DocStoreResult;

use crate::to_storage_err;

/// Create every index the config enables. An index created on a database
/// that already holds documents is back-filled immediately.
pub fn ensure_indexes(conn: &Connection, config: &DocumentStoreConfig) -> DocStoreResult<()> {
    let populated = document_count(conn)? > 0;
    if config.use_bm25 && lexical::create(conn, config.fts_tokenizer)? && populated {
        info!("back-filling new lexical index");
        lexical::rebuild(conn)?;
    }
    if config.vector_index_enabled() && vector::create(conn)? && populated {
        info!("back-filling new vector index");
        vector::rebuild(conn)?;
    }
    Ok(())
}

/// Rebuild every enabled index from the canonical relation.
pub fn rebuild_all(conn: &Connection, config: &DocumentStoreConfig) -> DocStoreResult<()> {
    if config.use_bm25 {
        lexical::rebuild(conn)?;
    }
    if config.vector_index_enabled() {
        vector::rebuild(conn)?;
    }
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> DocStoreResult<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![name],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| to_storage_err(e.to_string()))
}

fn document_count(conn: &Connection) -> DocStoreResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM document", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
