//! Global defaults and fixed limits.

/// Default number of documents returned by a retriever.
pub const DEFAULT_TOP_K: usize = 10;

/// Default size of the nearest-neighbour candidate window.
pub const DEFAULT_NUM_CANDIDATES: usize = 100;

/// FTS5 refuses snippet budgets above this many tokens.
pub const MAX_SNIPPET_TOKENS: u8 = 64;

/// Default snippet token budget.
pub const DEFAULT_SNIPPET_TOKENS: u8 = 16;

/// Divisor applied to raw BM25 scores before logistic squashing.
/// With 8, a raw score of -10 scales to ~0.78.
pub const BM25_SCALING_FACTOR: f64 = 8.0;

/// Reserved auxiliary keys attached to lexical results.
pub const SNIPPET_KEY: &str = "snippet";
pub const HIGHLIGHT_KEY: &str = "highlight";

/// Database location meaning "private in-memory database".
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Component type tags used by the host serialization protocol.
pub const DOCUMENT_STORE_TYPE: &str = "lexvec_storage.StorageEngine";
pub const BM25_RETRIEVER_TYPE: &str = "lexvec_retrieval.Bm25Retriever";
pub const EMBEDDING_RETRIEVER_TYPE: &str = "lexvec_retrieval.EmbeddingRetriever";
