use lexvec_core::{Document, DocumentStoreConfig, DuplicatePolicy, IDocumentStore, SimilarityFunction};
use lexvec_storage::StorageEngine;

pub fn store_with(docs_fixture: &str, config: DocumentStoreConfig) -> StorageEngine {
    let engine = StorageEngine::open(config).expect("open store");
    let docs: Vec<Document> = test_fixtures::load_documents(docs_fixture);
    engine
        .write_documents(&docs, DuplicatePolicy::Fail)
        .expect("seed documents");
    engine
}

pub fn lexical_store() -> StorageEngine {
    store_with("lexical_corpus.json", DocumentStoreConfig::in_memory())
}

pub fn vector_store(similarity: SimilarityFunction) -> StorageEngine {
    StorageEngine::open(DocumentStoreConfig::in_memory().with_embeddings(2, similarity))
        .expect("open vector store")
}

pub fn ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.id.as_str()).collect()
}
