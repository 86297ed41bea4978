//! Retrieval query builder.
//!
//! Both retrieval modes share one statement shape: the filter predicate is
//! applied to `document`, a ranking source produces `(pk, score, ...)`
//! candidates, and the two are joined on `pk` and ordered by ascending
//! score. Lower scores are better in both modes.

pub mod builder;
pub mod distance;
pub mod lexical;
pub mod vector;

pub use builder::{CandidateSource, RankedQuery};
pub use lexical::bm25_retrieval;
pub use vector::embedding_retrieval;
