//! In-memory `IDocumentStore` that records the requests it receives.

use std::sync::Mutex;

use lexvec_core::config::ComponentData;
use lexvec_core::errors::DocStoreResult;
use lexvec_core::{
    Document, DocumentStoreConfig, DuplicatePolicy, FilterExpression, IDocumentStore,
    LexicalRequest, RetrievedDocument, VectorRequest,
};

#[derive(Default)]
pub(crate) struct RecordingStore {
    scores: Vec<f64>,
    lexical: Mutex<Option<LexicalRequest>>,
    vector: Mutex<Option<VectorRequest>>,
}

impl RecordingStore {
    /// Answer every retrieval with one hit per score, in the given order.
    pub(crate) fn with_scores(scores: &[f64]) -> Self {
        Self {
            scores: scores.to_vec(),
            ..Self::default()
        }
    }

    pub(crate) fn last_lexical(&self) -> Option<LexicalRequest> {
        self.lexical.lock().unwrap().clone()
    }

    pub(crate) fn last_vector(&self) -> Option<VectorRequest> {
        self.vector.lock().unwrap().clone()
    }

    fn hits(&self) -> Vec<RetrievedDocument> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, score)| {
                let mut doc = Document::new(format!("hit {i}")).with_id(format!("hit-{i}"));
                doc.score = Some(*score);
                RetrievedDocument::new(doc)
            })
            .collect()
    }
}

impl IDocumentStore for RecordingStore {
    fn count_documents(&self) -> DocStoreResult<usize> {
        Ok(0)
    }

    fn filter_documents(&self, _filters: Option<&FilterExpression>) -> DocStoreResult<Vec<Document>> {
        Ok(Vec::new())
    }

    fn write_documents(&self, documents: &[Document], _policy: DuplicatePolicy) -> DocStoreResult<usize> {
        Ok(documents.len())
    }

    fn delete_documents(&self, _ids: &[String]) -> DocStoreResult<()> {
        Ok(())
    }

    fn bm25_retrieval(&self, request: &LexicalRequest) -> DocStoreResult<Vec<RetrievedDocument>> {
        *self.lexical.lock().unwrap() = Some(request.clone());
        Ok(self.hits())
    }

    fn embedding_retrieval(&self, request: &VectorRequest) -> DocStoreResult<Vec<RetrievedDocument>> {
        *self.vector.lock().unwrap() = Some(request.clone());
        Ok(self.hits())
    }

    fn to_component(&self) -> DocStoreResult<ComponentData> {
        DocumentStoreConfig::in_memory().to_component()
    }
}
