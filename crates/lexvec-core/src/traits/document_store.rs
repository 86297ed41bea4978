use crate::config::ComponentData;
use crate::document::{Document, DuplicatePolicy};
use crate::errors::DocStoreResult;
use crate::filter::FilterExpression;
use crate::retrieval::{LexicalRequest, RetrievedDocument, VectorRequest};

/// Canonical document storage plus its derived ranking indexes.
pub trait IDocumentStore: Send + Sync {
    // --- CRUD ---
    fn count_documents(&self) -> DocStoreResult<usize>;
    fn filter_documents(&self, filters: Option<&FilterExpression>)
        -> DocStoreResult<Vec<Document>>;
    fn write_documents(
        &self,
        documents: &[Document],
        policy: DuplicatePolicy,
    ) -> DocStoreResult<usize>;
    fn delete_documents(&self, ids: &[String]) -> DocStoreResult<()>;

    // --- Retrieval ---
    fn bm25_retrieval(&self, request: &LexicalRequest) -> DocStoreResult<Vec<RetrievedDocument>>;
    fn embedding_retrieval(
        &self,
        request: &VectorRequest,
    ) -> DocStoreResult<Vec<RetrievedDocument>>;

    // --- Serialization ---
    fn to_component(&self) -> DocStoreResult<ComponentData>;
}
