//! Vector similarity retriever component.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use lexvec_core::config::ComponentData;
use lexvec_core::errors::DocStoreResult;
use lexvec_core::{FilterExpression, IDocumentStore, RetrievedDocument, VectorRequest};
use lexvec_storage::StorageEngine;

use crate::config::EmbeddingRetrieverConfig;
use crate::{positive_num_candidates, positive_top_k, resolve, DOCUMENT_STORE_KEY};

/// Retrieves the documents whose embeddings are closest to a query vector.
pub struct EmbeddingRetriever {
    store: Arc<dyn IDocumentStore>,
    config: EmbeddingRetrieverConfig,
}

impl EmbeddingRetriever {
    pub fn new(
        store: Arc<dyn IDocumentStore>,
        config: EmbeddingRetrieverConfig,
    ) -> DocStoreResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn with_defaults(store: Arc<dyn IDocumentStore>) -> Self {
        Self {
            store,
            config: EmbeddingRetrieverConfig::default(),
        }
    }

    pub fn config(&self) -> &EmbeddingRetrieverConfig {
        &self.config
    }

    /// Run a query. `None` arguments fall back to the configured defaults.
    ///
    /// Filters narrow the `num_candidates` nearest neighbours, so a
    /// selective filter may return fewer than `top_k` documents.
    pub fn run(
        &self,
        query_embedding: &[f32],
        filters: Option<&FilterExpression>,
        top_k: Option<i64>,
        num_candidates: Option<i64>,
    ) -> DocStoreResult<Vec<RetrievedDocument>> {
        let top_k = positive_top_k(resolve(top_k, self.config.top_k))?;
        let num_candidates =
            positive_num_candidates(resolve(num_candidates, self.config.num_candidates))?;
        let filters = filters.or(self.config.filters.as_ref()).cloned();

        let request = VectorRequest::new(query_embedding.to_vec())?
            .with_filters(filters)
            .with_top_k(Some(top_k))?
            .with_num_candidates(num_candidates)?;
        let hits = self.store.embedding_retrieval(&request)?;
        debug!(top_k, num_candidates, hits = hits.len(), "embedding retrieval");
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
        let config: EmbeddingRetrieverConfig = data.into_config()?;
        let store_data = data.nested(DOCUMENT_STORE_KEY)?;
        let store = StorageEngine::from_component(&store_data)?;
        Self::new(Arc::new(store), config)
    }

    pub fn from_value(value: &Value) -> DocStoreResult<Self> {
        Self::from_component(&ComponentData::from_value(value)?)
    }
}
