//! Presentational score transforms.

use lexvec_core::constants::BM25_SCALING_FACTOR;
use lexvec_core::RetrievedDocument;

/// Map a raw BM25 score (lower is better) into `(0, 1)`, higher is better.
///
/// Strictly decreasing in the raw score, so it never reorders results.
pub fn scale_bm25(raw: f64) -> f64 {
    1.0 / (1.0 + (raw / BM25_SCALING_FACTOR).exp())
}

/// Rewrite every hit's score in place.
pub fn scale_scores(hits: &mut [RetrievedDocument]) {
    for hit in hits {
        if let Some(raw) = hit.document.score {
            hit.document.score = Some(scale_bm25(raw));
        }
    }
}
