//! # lexvec-retrieval
//!
//! Retriever components over an [`IDocumentStore`](lexvec_core::IDocumentStore).
//! Each retriever resolves per-call overrides against its configured
//! defaults, validates them, and delegates ranking to the store.

pub mod bm25_retriever;
pub mod config;
pub mod embedding_retriever;
pub mod scoring;

pub use bm25_retriever::Bm25Retriever;
pub use config::{Bm25RetrieverConfig, EmbeddingRetrieverConfig};
pub use embedding_retriever::EmbeddingRetriever;

use lexvec_core::errors::{DocStoreResult, ValidationError};

/// Key under which a retriever serializes the store it reads from.
pub const DOCUMENT_STORE_KEY: &str = "document_store";

/// Explicit argument wins, then the configured default.
pub(crate) fn resolve<T>(explicit: Option<T>, configured: T) -> T {
    explicit.unwrap_or(configured)
}

pub(crate) fn positive_top_k(top_k: i64) -> DocStoreResult<usize> {
    usize::try_from(top_k)
        .ok()
        .filter(|k| *k > 0)
        .ok_or_else(|| ValidationError::InvalidTopK { top_k }.into())
}

pub(crate) fn positive_num_candidates(num_candidates: i64) -> DocStoreResult<usize> {
    usize::try_from(num_candidates)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ValidationError::InvalidNumCandidates { num_candidates }.into())
}


#[cfg(test)]
mod test_support;
