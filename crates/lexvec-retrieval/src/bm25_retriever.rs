//! Lexical (BM25) retriever component.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use lexvec_core::config::ComponentData;
use lexvec_core::errors::DocStoreResult;
use lexvec_core::{FilterExpression, IDocumentStore, LexicalRequest, RetrievedDocument};
use lexvec_storage::StorageEngine;

use crate::config::Bm25RetrieverConfig;
use crate::scoring::scale_scores;
use crate::{positive_top_k, resolve, DOCUMENT_STORE_KEY};

/// Retrieves documents by BM25 relevance to a query string.
pub struct Bm25Retriever {
    store: Arc<dyn IDocumentStore>,
    config: Bm25RetrieverConfig,
}

impl Bm25Retriever {
    /// Fails with a validation error if the configured `top_k` is not positive.
    pub fn new(store: Arc<dyn IDocumentStore>, config: Bm25RetrieverConfig) -> DocStoreResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn with_defaults(store: Arc<dyn IDocumentStore>) -> Self {
        Self {
            store,
            config: Bm25RetrieverConfig::default(),
        }
    }

    pub fn config(&self) -> &Bm25RetrieverConfig {
        &self.config
    }

    /// Run a query. `None` arguments fall back to the configured defaults.
    pub fn run(
        &self,
        query: &str,
        filters: Option<&FilterExpression>,
        top_k: Option<i64>,
        scale_score: Option<bool>,
    ) -> DocStoreResult<Vec<RetrievedDocument>> {
        let top_k = positive_top_k(resolve(top_k, self.config.top_k))?;
        let scale_score = resolve(scale_score, self.config.scale_score);
        let filters = filters.or(self.config.filters.as_ref()).cloned();

        let mut request = LexicalRequest::new(query)?
            .with_filters(filters)
            .with_top_k(Some(top_k))?;
        if let Some(snippet) = &self.config.snippet {
            request = request.with_snippet(snippet.clone());
        }
        if let Some(highlight) = &self.config.highlight {
            request = request.with_highlight(highlight.clone());
        }
        let mut hits = self.store.bm25_retrieval(&request)?;
        if scale_score {
            scale_scores(&mut hits);
        }
        debug!(top_k, scale_score, hits = hits.len(), "bm25 retrieval");
        Ok(hits)
    }

    pub fn to_component(&self) -> DocStoreResult<ComponentData> {
        let mut data = ComponentData::from_config(&self.config)?;
        data.init_parameters.insert(
            DOCUMENT_STORE_KEY.to_string(),
            self.store.to_component()?.to_value(),
        );
        Ok(data)
    }

    /// Rebuild the retriever and the store it reads from.
    pub fn from_component(data: &ComponentData) -> DocStoreResult<Self> {
        let config: Bm25RetrieverConfig = data.into_config()?;
        let store_data = data.nested(DOCUMENT_STORE_KEY)?;
        let store = StorageEngine::from_component(&store_data)?;
        Self::new(Arc::new(store), config)
    }

    pub fn from_value(value: &Value) -> DocStoreResult<Self> {
        Self::from_component(&ComponentData::from_value(value)?)
    }
}
