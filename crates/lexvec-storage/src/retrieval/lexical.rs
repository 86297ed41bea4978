//! BM25 ranking over the FTS5 index.

use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use tracing::warn;

use lexvec_core::constants::{HIGHLIGHT_KEY, SNIPPET_KEY};
use lexvec_core::errors::{DocStoreResult, ValidationError};
use lexvec_core::LexicalRequest;
use lexvec_core::RetrievedDocument;

use super::builder::{build_ranked_query, decode_rows, query_rows, CandidateSource, RankedRow};
use crate::filters::{compile_optional, CompiledPredicate};
use crate::to_storage_err;

/// Candidate subquery for a full-text `MATCH`.
///
/// Parameter order: snippet args, highlight args, match expression.
pub fn lexical_candidates(request: &LexicalRequest, match_query: &str) -> CandidateSource {
    let mut sql = String::from("SELECT rowid AS pk, bm25(document_fts) AS score");
    let mut parameters = Vec::new();
    let mut aux_columns = Vec::new();

    if let Some(snippet) = request.snippet() {
        sql.push_str(&format!(", snippet(document_fts, 0, ?, ?, ?, ?) AS {SNIPPET_KEY}"));
        parameters.push(SqlValue::Text(snippet.open_marker.clone()));
        parameters.push(SqlValue::Text(snippet.close_marker.clone()));
        parameters.push(SqlValue::Text(snippet.ellipsis.clone()));
        parameters.push(SqlValue::Integer(i64::from(snippet.max_tokens())));
        aux_columns.push(SNIPPET_KEY);
    }
    if let Some(highlight) = request.highlight() {
        sql.push_str(&format!(", highlight(document_fts, 0, ?, ?) AS {HIGHLIGHT_KEY}"));
        parameters.push(SqlValue::Text(highlight.open_marker.clone()));
        parameters.push(SqlValue::Text(highlight.close_marker.clone()));
        aux_columns.push(HIGHLIGHT_KEY);
    }

    sql.push_str(" FROM document_fts WHERE document_fts MATCH ?");
    parameters.push(SqlValue::Text(match_query.to_string()));

    CandidateSource {
        sql,
        parameters,
        aux_columns,
    }
}

/// Rank documents matching `request.query()` by BM25, best first.
///
/// A query FTS5 rejects is retried once as a sequence of quoted terms.
pub fn bm25_retrieval(
    conn: &Connection,
    request: &LexicalRequest,
) -> DocStoreResult<Vec<RetrievedDocument>> {
    let predicate = compile_optional(request.filters())?;

    let (rows, aux_columns) = match run(conn, request, predicate.as_ref(), request.query()) {
        Ok(raw) => raw,
        Err(e) if is_fts5_syntax_error(&e) => {
            let (sanitized, changed) = sanitize_fts5_query(request.query());
            if sanitized.is_empty() {
                return Err(ValidationError::EmptyQuery.into());
            }
            if !changed {
                return Err(to_storage_err(e.to_string()));
            }
            warn!(
                query = request.query(),
                sanitized = %sanitized,
                "fts5 rejected query syntax, retrying with sanitized query"
            );
            run(conn, request, predicate.as_ref(), &sanitized)
                .map_err(|e| to_storage_err(e.to_string()))?
        }
        Err(e) => return Err(to_storage_err(e.to_string())),
    };
    decode_rows(rows, &aux_columns)
}

type RawResults = (Vec<RankedRow>, Vec<&'static str>);

fn run(
    conn: &Connection,
    request: &LexicalRequest,
    predicate: Option<&CompiledPredicate>,
    match_query: &str,
) -> rusqlite::Result<RawResults> {
    let candidates = lexical_candidates(request, match_query);
    let query = build_ranked_query(predicate, candidates, request.top_k());
    let rows = query_rows(conn, &query)?;
    Ok((rows, query.aux_columns))
}

/// FTS5 operator keywords. Only the uppercase forms are operators.
const FTS5_KEYWORDS: [&str; 4] = ["AND", "OR", "NOT", "NEAR"];

/// Rewrite a rejected query as a sequence of quoted terms.
///
/// Terms are runs of alphanumerics and `_`; everything else separates them.
/// Bare operator keywords are dropped, and each remaining term becomes a
/// phrase (`fox-trot` -> `"fox" "trot"`), so column prefixes and dangling
/// operators can't reach the FTS5 parser. Returns the sanitized query and
/// whether it differs from the input.
pub fn sanitize_fts5_query(query: &str) -> (String, bool) {
    let terms: Vec<String> = query
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .filter(|term| !term.is_empty() && !FTS5_KEYWORDS.contains(term))
        .map(|term| format!("\"{term}\""))
        .collect();
    let sanitized = terms.join(" ");
    let changed = sanitized != query.trim();
    (sanitized, changed)
}

/// FTS5 reports a malformed expression as a syntax error, and a `word:`
/// prefix or a `-` inside a bareword as an unknown column.
fn is_fts5_syntax_error(err: &rusqlite::Error) -> bool {
    let message = err.to_string();
    message.contains("fts5: syntax error")
        || message.contains("unterminated string")
        || message.contains("no such column")
}
