use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use tracing::debug;

use lexvec_core::errors::DocStoreResult;
use lexvec_core::RetrievedDocument;

use crate::codec::{self, DocumentRecord, DOCUMENT_COLUMNS, DOCUMENT_COLUMN_COUNT};
use crate::filters::CompiledPredicate;
use crate::to_storage_err;

/// A subquery yielding `pk` and `score` plus any auxiliary text columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSource {
    pub sql: String,
    pub parameters: Vec<SqlValue>,
    /// Names of the extra columns after `score`, in select order.
    pub aux_columns: Vec<&'static str>,
}

/// The final statement and its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedQuery {
    pub sql: String,
    pub parameters: Vec<SqlValue>,
    pub aux_columns: Vec<&'static str>,
}

/// Join filtered documents with ranked candidates.
///
/// Parameter order: filter, candidate source, limit.
pub fn build_ranked_query(
    predicate: Option<&CompiledPredicate>,
    candidates: CandidateSource,
    top_k: Option<usize>,
) -> RankedQuery {
    let mut parameters = Vec::new();

    let where_clause = match predicate {
        Some(p) => {
            parameters.extend(p.parameters.iter().cloned());
            format!(" WHERE {}", p.fragment)
        }
        None => String::new(),
    };
    parameters.extend(candidates.parameters);

    let aux_select: String = candidates
        .aux_columns
        .iter()
        .map(|col| format!(", b.{col}"))
        .collect();

    let outer_columns = DOCUMENT_COLUMNS
        .split(", ")
        .map(|col| format!("a.{col}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "SELECT {outer_columns}, b.score{aux_select} \
         FROM (SELECT pk, {DOCUMENT_COLUMNS} FROM document{where_clause}) a \
         INNER JOIN ({candidates}) b ON a.pk = b.pk \
         ORDER BY b.score ASC, a.pk ASC",
        candidates = candidates.sql,
    );
    if let Some(limit) = top_k {
        sql.push_str(" LIMIT ?");
        parameters.push(SqlValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }

    RankedQuery {
        sql,
        parameters,
        aux_columns: candidates.aux_columns,
    }
}

/// Raw row: document columns, score, aux texts.
pub(crate) type RankedRow = (DocumentRecord, f64, Vec<Option<String>>);

/// Execute without decoding, so callers can inspect SQLite errors.
pub(crate) fn query_rows(conn: &Connection, query: &RankedQuery) -> rusqlite::Result<Vec<RankedRow>> {
    debug!(sql = %query.sql, params = query.parameters.len(), "ranked query");
    let aux_count = query.aux_columns.len();
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt.query_map(params_from_iter(query.parameters.iter()), |row| {
        let record = DocumentRecord::from_row(row, 0)?;
        let score: f64 = row.get(DOCUMENT_COLUMN_COUNT)?;
        let mut aux = Vec::with_capacity(aux_count);
        for i in 0..aux_count {
            aux.push(row.get(DOCUMENT_COLUMN_COUNT + 1 + i)?);
        }
        Ok((record, score, aux))
    })?;
    rows.collect()
}

pub(crate) fn decode_rows(
    rows: Vec<RankedRow>,
    aux_columns: &[&'static str],
) -> DocStoreResult<Vec<RetrievedDocument>> {
    let mut results = Vec::with_capacity(rows.len());
    for (record, score, aux) in rows {
        let mut document = codec::decode(record)?;
        document.score = Some(score);
        let mut hit = RetrievedDocument::new(document);
        for (name, text) in aux_columns.iter().zip(aux) {
            if let Some(text) = text {
                hit.aux.insert((*name).to_string(), Value::String(text));
            }
        }
        results.push(hit);
    }
    Ok(results)
}

/// Build, execute and decode in one step.
pub fn run_ranked_query(
    conn: &Connection,
    query: &RankedQuery,
) -> DocStoreResult<Vec<RetrievedDocument>> {
    let rows = query_rows(conn, query).map_err(|e| to_storage_err(e.to_string()))?;
    decode_rows(rows, &query.aux_columns)
}
