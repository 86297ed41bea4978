//! Read paths over the canonical relation.

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use lexvec_core::errors::DocStoreResult;
use lexvec_core::filter::FilterExpression;
use lexvec_core::Document;

use crate::codec::{self, DocumentRecord, DOCUMENT_COLUMNS};
use crate::filters::compile_optional;
use crate::to_storage_err;

pub fn count_documents(conn: &Connection) -> DocStoreResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM document", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Every document matching `filter`, in insertion order.
pub fn filter_documents(
    conn: &Connection,
    filter: Option<&FilterExpression>,
) -> DocStoreResult<Vec<Document>> {
    let predicate = compile_optional(filter)?;
    let (where_clause, parameters) = match predicate {
        Some(p) => (format!(" WHERE {}", p.fragment), p.parameters),
        None => (String::new(), Vec::new()),
    };
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM document{where_clause} ORDER BY pk");
    debug!(sql = %sql, "filter documents");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(parameters), |row| DocumentRecord::from_row(row, 0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut docs = Vec::new();
    for row in rows {
        let record = row.map_err(|e| to_storage_err(e.to_string()))?;
        docs.push(codec::decode(record)?);
    }
    Ok(docs)
}
