//! Integration test: embedding retrieval and the candidate window.

use lexvec_core::{
    DocStoreError, Document, DuplicatePolicy, FilterExpression, IDocumentStore,
    SimilarityFunction, ValidationError, VectorRequest,
};
use serde_json::json;

use crate::common::vector_store;

fn seed() -> Vec<Document> {
    vec![
        Document::new("east").with_id("e").with_embedding(vec![1.0, 0.0]).with_meta_entry("side", "right"),
        Document::new("north-east").with_id("ne").with_embedding(vec![0.7, 0.7]).with_meta_entry("side", "right"),
        Document::new("north").with_id("n").with_embedding(vec![0.0, 1.0]).with_meta_entry("side", "up"),
        Document::new("west").with_id("w").with_embedding(vec![-1.0, 0.0]).with_meta_entry("side", "left"),
        Document::new("no vector").with_id("none"),
    ]
}

#[test]
fn nearest_documents_come_first() {
    let engine = vector_store(SimilarityFunction::Cosine);
    engine.write_documents(&seed(), DuplicatePolicy::Fail).unwrap();

    let request = VectorRequest::new(vec![1.0, 0.1]).unwrap().with_top_k(Some(3)).unwrap();
    let hits = engine.embedding_retrieval(&request).unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(ids, vec!["e", "ne", "n"]);
    assert!(hits.windows(2).all(|w| w[0].score() <= w[1].score()));
}

#[test]
fn filters_apply_after_the_window() {
    let engine = vector_store(SimilarityFunction::DotProduct);
    engine.write_documents(&seed(), DuplicatePolicy::Fail).unwrap();
    let filter = FilterExpression::from_value(&json!({
        "field": "meta.side", "operator": "==", "value": "left"
    }))
    .unwrap();

    // "w" is the farthest vector, so a window of two never reaches it.
    let narrow = VectorRequest::new(vec![1.0, 0.0])
        .unwrap()
        .with_filters(Some(filter.clone()))
        .with_num_candidates(2)
        .unwrap();
    assert!(engine.embedding_retrieval(&narrow).unwrap().is_empty());

    let wide = VectorRequest::new(vec![1.0, 0.0])
        .unwrap()
        .with_filters(Some(filter))
        .with_num_candidates(10)
        .unwrap();
    let hits = engine.embedding_retrieval(&wide).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.id, "w");
}

#[test]
fn empty_index_returns_nothing() {
    let engine = vector_store(SimilarityFunction::Cosine);
    let hits = engine
        .embedding_retrieval(&VectorRequest::new(vec![1.0, 0.0]).unwrap())
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn query_width_must_match_the_index() {
    let engine = vector_store(SimilarityFunction::Cosine);
    assert!(matches!(
        engine.embedding_retrieval(&VectorRequest::new(vec![1.0, 0.0, 0.0]).unwrap()),
        Err(DocStoreError::Validation(ValidationError::DimensionMismatch {
            expected: 2,
            actual: 3
        }))
    ));
}
