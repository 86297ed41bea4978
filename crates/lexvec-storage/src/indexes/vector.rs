//! Vector index: the embedding of every document that has one, keyed by `pk`.
//!
//! Holds nothing filterable. Nearest-neighbour search over it lives in
//! `retrieval::vector`.

use rusqlite::Connection;

use lexvec_core::errors::DocStoreResult;

use super::table_exists;
use crate::to_storage_err;

pub const TABLE: &str = "document_vec";

const CREATE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS document_vec (
    pk INTEGER PRIMARY KEY,
    embedding TEXT NOT NULL
);

CREATE TRIGGER IF NOT EXISTS document_ai_vec AFTER INSERT ON document
WHEN new.embedding IS NOT NULL BEGIN
    INSERT INTO document_vec(pk, embedding) VALUES (new.pk, new.embedding);
END;

CREATE TRIGGER IF NOT EXISTS document_ad_vec AFTER DELETE ON document BEGIN
    DELETE FROM document_vec WHERE pk = old.pk;
END;

CREATE TRIGGER IF NOT EXISTS document_au_vec AFTER UPDATE ON document BEGIN
    DELETE FROM document_vec WHERE pk = old.pk;
    INSERT INTO document_vec(pk, embedding)
        SELECT new.pk, new.embedding WHERE new.embedding IS NOT NULL;
END;
"#;

/// Create the index and its triggers. Returns `true` if the table is new.
pub fn create(conn: &Connection) -> DocStoreResult<bool> {
    let existed = table_exists(conn, TABLE)?;
    conn.execute_batch(CREATE_SQL)
        .map_err(|e| to_storage_err(format!("create vector index: {e}")))?;
    Ok(!existed)
}

/// Re-derive the whole index from `document`.
pub fn rebuild(conn: &Connection) -> DocStoreResult<()> {
    conn.execute_batch(
        "
        DELETE FROM document_vec;
        INSERT INTO document_vec(pk, embedding)
            SELECT pk, embedding FROM document WHERE embedding IS NOT NULL;
        ",
    )
    .map_err(|e| to_storage_err(format!("rebuild vector index: {e}")))
}
