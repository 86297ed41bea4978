//! Integration test: derived indexes follow the canonical relation.

use lexvec_core::{
    Document, DocumentStoreConfig, DuplicatePolicy, IDocumentStore, LexicalRequest,
    SimilarityFunction, VectorRequest,
};
use lexvec_storage::StorageEngine;

fn hits(engine: &StorageEngine, query: &str) -> Vec<String> {
    engine
        .bm25_retrieval(&LexicalRequest::new(query).unwrap())
        .unwrap()
        .into_iter()
        .map(|h| h.document.id)
        .collect()
}

#[test]
fn overwrite_and_delete_update_the_lexical_index() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .write_documents(&[Document::new("alpha beta").with_id("a")], DuplicatePolicy::Fail)
        .unwrap();
    assert_eq!(hits(&engine, "alpha"), vec!["a"]);

    engine
        .write_documents(&[Document::new("gamma delta").with_id("a")], DuplicatePolicy::Overwrite)
        .unwrap();
    assert!(hits(&engine, "alpha").is_empty());
    assert_eq!(hits(&engine, "gamma"), vec!["a"]);

    engine.delete_documents(&["a".to_string()]).unwrap();
    assert!(hits(&engine, "gamma").is_empty());
}

#[test]
fn overwrite_and_delete_update_the_vector_index() {
    let engine = StorageEngine::open(
        DocumentStoreConfig::in_memory().with_embeddings(2, SimilarityFunction::Cosine),
    )
    .unwrap();
    engine
        .write_documents(
            &[Document::new("v").with_id("v").with_embedding(vec![1.0, 0.0])],
            DuplicatePolicy::Fail,
        )
        .unwrap();
    let request = VectorRequest::new(vec![1.0, 0.0]).unwrap();
    assert_eq!(engine.embedding_retrieval(&request).unwrap().len(), 1);

    // Dropping the embedding removes the document from the index.
    engine
        .write_documents(&[Document::new("v").with_id("v")], DuplicatePolicy::Overwrite)
        .unwrap();
    assert!(engine.embedding_retrieval(&request).unwrap().is_empty());

    engine
        .write_documents(
            &[Document::new("v").with_id("v").with_embedding(vec![0.0, 1.0])],
            DuplicatePolicy::Overwrite,
        )
        .unwrap();
    let hits = engine.embedding_retrieval(&request).unwrap();
    assert_eq!(hits.len(), 1);
    assert!((hits[0].score().unwrap() - 1.0).abs() < 1e-6);

    engine.delete_documents(&["v".to_string()]).unwrap();
    assert!(engine.embedding_retrieval(&request).unwrap().is_empty());
}

#[test]
fn rebuild_restores_a_consistent_index() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .write_documents(
            &[
                Document::new("red apple").with_id("1"),
                Document::new("green pear").with_id("2"),
            ],
            DuplicatePolicy::Fail,
        )
        .unwrap();
    engine.rebuild_indexes().unwrap();
    assert_eq!(hits(&engine, "apple"), vec!["1"]);
    assert_eq!(hits(&engine, "pear"), vec!["2"]);
}
