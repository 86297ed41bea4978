/// Bad caller input. Surfaced immediately, never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("query should be a non-empty string")]
    EmptyQuery,

    #[error("query embedding should be a non-empty vector")]
    EmptyQueryVector,

    #[error("top_k must be greater than 0, got {top_k}")]
    InvalidTopK { top_k: i64 },

    #[error("num_candidates must be greater than 0, got {num_candidates}")]
    InvalidNumCandidates { num_candidates: i64 },

    #[error("snippet token budget must be within 1..={max}, got {requested}")]
    SnippetTokensOutOfRange { requested: i64, max: u8 },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding contains non-finite values (document '{id}')")]
    NonFiniteEmbedding { id: String },
}
