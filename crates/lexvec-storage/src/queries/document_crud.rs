//! Write and delete paths for documents.

use rusqlite::{ffi, params, Connection, ErrorCode};
use tracing::info;

use lexvec_core::errors::{DocStoreError, DocStoreResult, ValidationError};
use lexvec_core::{Document, DuplicatePolicy};

use crate::codec::{self, DOCUMENT_COLUMNS};
use crate::to_storage_err;

const INSERT_SQL: &str = "INSERT INTO document (id, content, dataframe, blob, meta, score, embedding)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// The conflict clause appended to [`INSERT_SQL`] for each policy.
fn conflict_clause(policy: DuplicatePolicy) -> &'static str {
    match policy.resolve() {
        DuplicatePolicy::Skip => " ON CONFLICT(id) DO NOTHING",
        // An upsert fires UPDATE triggers, so derived indexes follow the new row.
        DuplicatePolicy::Overwrite => {
            " ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                dataframe = excluded.dataframe,
                blob = excluded.blob,
                meta = excluded.meta,
                score = excluded.score,
                embedding = excluded.embedding"
        }
        DuplicatePolicy::Fail | DuplicatePolicy::None => "",
    }
}

/// Check every embedding before anything is written.
pub fn validate_embeddings(docs: &[Document], dims: Option<usize>) -> DocStoreResult<()> {
    for doc in docs {
        let Some(embedding) = &doc.embedding else {
            continue;
        };
        if embedding.iter().any(|x| !x.is_finite()) {
            return Err(ValidationError::NonFiniteEmbedding { id: doc.id.clone() }.into());
        }
        if let Some(expected) = dims {
            if embedding.len() != expected {
                return Err(ValidationError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Write a batch under one conflict policy. Returns the number of rows
/// inserted or overwritten; skipped duplicates don't count.
///
/// Callers run this inside a transaction so a failure leaves nothing behind.
pub fn write_documents(
    conn: &Connection,
    docs: &[Document],
    policy: DuplicatePolicy,
) -> DocStoreResult<usize> {
    let sql = format!("{INSERT_SQL}{}", conflict_clause(policy));
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(format!("prepare write: {e}")))?;

    let mut written = 0;
    for doc in docs {
        let record = codec::encode(doc)?;
        let changed = stmt
            .execute(params![
                record.id,
                record.content,
                record.dataframe,
                record.blob,
                record.meta,
                record.score,
                record.embedding,
            ])
            .map_err(|e| map_write_err(e, &doc.id))?;
        written += changed;
    }
    info!(
        batch = docs.len(),
        written,
        policy = ?policy.resolve(),
        "wrote documents"
    );
    Ok(written)
}

/// Delete by id. Ids that don't exist are ignored.
pub fn delete_documents(conn: &Connection, ids: &[String]) -> DocStoreResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let ids_json = serde_json::to_string(ids)?;
    let deleted = conn
        .execute(
            "DELETE FROM document WHERE id IN (SELECT value FROM json_each(?1))",
            params![ids_json],
        )
        .map_err(|e| to_storage_err(format!("delete documents: {e}")))?;
    info!(requested = ids.len(), deleted, "deleted documents");
    Ok(deleted)
}

/// Fetch a single document by id.
pub fn get_document(conn: &Connection, id: &str) -> DocStoreResult<Option<Document>> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM document WHERE id = ?1");
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query(params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next().map_err(|e| to_storage_err(e.to_string()))? {
        Some(row) => {
            let record =
                codec::DocumentRecord::from_row(row, 0).map_err(|e| to_storage_err(e.to_string()))?;
            Ok(Some(codec::decode(record)?))
        }
        None => Ok(None),
    }
}

fn map_write_err(e: rusqlite::Error, id: &str) -> DocStoreError {
    if is_unique_violation(&e) {
        DocStoreError::DuplicateDocument { id: id.to_string() }
    } else {
        to_storage_err(format!("write document '{id}': {e}"))
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(err, _) => {
            err.code == ErrorCode::ConstraintViolation
                && matches!(
                    err.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}
