//! Nearest-neighbour ranking over the vector index.
//!
//! The index is scanned in Rust and only the best `num_candidates` survive.
//! Filters apply after that window is chosen, so a selective filter can
//! leave fewer than `top_k` hits even when more matching documents exist.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use tracing::{debug, warn};

use lexvec_core::errors::{DocStoreResult, ValidationError};
use lexvec_core::{RetrievedDocument, SimilarityFunction, VectorRequest};

use super::builder::{build_ranked_query, run_ranked_query, CandidateSource};
use super::distance::distance;
use crate::filters::compile_optional;
use crate::to_storage_err;

/// A scored index entry. Ordered by distance, then `pk`, so the max-heap
/// top is always the worst candidate kept so far.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    pk: i64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.pk.cmp(&other.pk))
    }
}

/// The `limit` index entries closest to `query`, closest first.
pub fn nearest_candidates(
    conn: &Connection,
    query: &[f32],
    similarity: SimilarityFunction,
    limit: usize,
) -> DocStoreResult<Vec<(i64, f64)>> {
    let mut stmt = conn
        .prepare("SELECT pk, embedding FROM document_vec")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(limit.saturating_add(1));
    for row in rows {
        let (pk, text) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let stored: Vec<f32> = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                warn!(pk, error = %e, "skipping unreadable vector index entry");
                continue;
            }
        };
        if stored.len() != query.len() {
            continue;
        }
        let d = distance(similarity, query, &stored);
        if !d.is_finite() {
            continue;
        }
        heap.push(Candidate { distance: d, pk });
        if heap.len() > limit {
            heap.pop();
        }
    }

    let window: Vec<(i64, f64)> = heap
        .into_sorted_vec()
        .into_iter()
        .map(|c| (c.pk, c.distance))
        .collect();
    debug!(window = window.len(), limit, "vector candidate window");
    Ok(window)
}

/// Candidate subquery over a precomputed window, bound as one JSON array
/// of `[pk, distance]` pairs.
pub fn vector_candidates(window: &[(i64, f64)]) -> DocStoreResult<CandidateSource> {
    let json = serde_json::to_string(window)?;
    Ok(CandidateSource {
        sql: "SELECT json_extract(value, '$[0]') AS pk, json_extract(value, '$[1]') AS score \
              FROM json_each(?)"
            .to_string(),
        parameters: vec![SqlValue::Text(json)],
        aux_columns: Vec::new(),
    })
}

/// Rank documents by distance to `request.query_vector()`, closest first.
pub fn embedding_retrieval(
    conn: &Connection,
    dims: usize,
    similarity: SimilarityFunction,
    request: &VectorRequest,
) -> DocStoreResult<Vec<RetrievedDocument>> {
    let query_vector = request.query_vector();
    if query_vector.len() != dims {
        return Err(ValidationError::DimensionMismatch {
            expected: dims,
            actual: query_vector.len(),
        }
        .into());
    }
    // A bad filter fails before the index is touched.
    let predicate = compile_optional(request.filters())?;

    let window = nearest_candidates(conn, query_vector, similarity, request.num_candidates())?;
    if window.is_empty() {
        return Ok(Vec::new());
    }
    let query = build_ranked_query(
        predicate.as_ref(),
        vector_candidates(&window)?,
        request.top_k(),
    );
    run_ranked_query(conn, &query)
}
