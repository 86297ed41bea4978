//! Retriever defaults, serialized as component init parameters.

use serde::{Deserialize, Serialize};

use lexvec_core::config::ComponentKind;
use lexvec_core::constants::{
    BM25_RETRIEVER_TYPE, DEFAULT_NUM_CANDIDATES, DEFAULT_TOP_K, EMBEDDING_RETRIEVER_TYPE,
};
use lexvec_core::errors::DocStoreResult;
use lexvec_core::{FilterExpression, HighlightOptions, SnippetOptions};

use crate::{positive_num_candidates, positive_top_k};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25RetrieverConfig {
    pub filters: Option<FilterExpression>,
    pub top_k: i64,
    /// Squash raw BM25 scores into `[0, 1]`.
    pub scale_score: bool,
    /// Attach a best-matching excerpt to each hit.
    pub snippet: Option<SnippetOptions>,
    /// Attach the full content with matches marked.
    pub highlight: Option<HighlightOptions>,
}

impl Default for Bm25RetrieverConfig {
    fn default() -> Self {
        Self {
            filters: None,
            top_k: DEFAULT_TOP_K as i64,
            scale_score: false,
            snippet: None,
            highlight: None,
        }
    }
}

impl ComponentKind for Bm25RetrieverConfig {
    const TYPE_NAME: &'static str = BM25_RETRIEVER_TYPE;
}

impl Bm25RetrieverConfig {
    pub fn validate(&self) -> DocStoreResult<()> {
        positive_top_k(self.top_k)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingRetrieverConfig {
    pub filters: Option<FilterExpression>,
    pub top_k: i64,
    /// Nearest neighbours searched before filters apply.
    pub num_candidates: i64,
}

impl Default for EmbeddingRetrieverConfig {
    fn default() -> Self {
        Self {
            filters: None,
            top_k: DEFAULT_TOP_K as i64,
            num_candidates: DEFAULT_NUM_CANDIDATES as i64,
        }
    }
}

impl ComponentKind for EmbeddingRetrieverConfig {
    const TYPE_NAME: &'static str = EMBEDDING_RETRIEVER_TYPE;
}

impl EmbeddingRetrieverConfig {
    pub fn validate(&self) -> DocStoreResult<()> {
        positive_top_k(self.top_k)?;
        positive_num_candidates(self.num_candidates)?;
        Ok(())
    }
}
