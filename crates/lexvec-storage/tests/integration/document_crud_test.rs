//! Integration test: write policies, counting, deletion.

use lexvec_core::{DocStoreError, Document, DuplicatePolicy, IDocumentStore};
use lexvec_storage::StorageEngine;
use serde_json::json;

#[test]
fn duplicate_write_fails_and_leaves_store_unchanged() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let doc = Document::new("test doc");

    assert_eq!(engine.write_documents(&[doc.clone()], DuplicatePolicy::None).unwrap(), 1);
    let err = engine
        .write_documents(&[doc.clone()], DuplicatePolicy::Fail)
        .unwrap_err();
    match err {
        DocStoreError::DuplicateDocument { id } => assert_eq!(id, doc.id),
        other => panic!("expected DuplicateDocument, got {other:?}"),
    }
    assert_eq!(engine.count_documents().unwrap(), 1);
}

#[test]
fn failed_batch_rolls_back_every_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = Document::new("a").with_id("a");
    engine.write_documents(&[a.clone()], DuplicatePolicy::Fail).unwrap();

    let b = Document::new("b").with_id("b");
    let result = engine.write_documents(&[b, a], DuplicatePolicy::Fail);
    assert!(matches!(result, Err(DocStoreError::DuplicateDocument { .. })));
    assert_eq!(engine.count_documents().unwrap(), 1);
    assert!(engine.get_document("b").unwrap().is_none());
}

#[test]
fn skip_and_overwrite_policies() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let original = Document::new("first").with_id("x").with_meta_entry("v", 1);
    engine.write_documents(&[original], DuplicatePolicy::Fail).unwrap();

    let replacement = Document::new("second").with_id("x").with_meta_entry("v", 2);
    assert_eq!(
        engine
            .write_documents(&[replacement.clone()], DuplicatePolicy::Skip)
            .unwrap(),
        0
    );
    let stored = engine.get_document("x").unwrap().unwrap();
    assert_eq!(stored.content.as_deref(), Some("first"));

    assert_eq!(
        engine
            .write_documents(&[replacement], DuplicatePolicy::Overwrite)
            .unwrap(),
        1
    );
    let stored = engine.get_document("x").unwrap().unwrap();
    assert_eq!(stored.content.as_deref(), Some("second"));
    assert_eq!(stored.meta["v"], json!(2));
    assert_eq!(engine.count_documents().unwrap(), 1);
}

#[test]
fn delete_ignores_unknown_ids() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let docs = [
        Document::new("one").with_id("1"),
        Document::new("two").with_id("2"),
    ];
    engine.write_documents(&docs, DuplicatePolicy::Fail).unwrap();

    engine
        .delete_documents(&["1".to_string(), "missing".to_string()])
        .unwrap();
    assert_eq!(engine.count_documents().unwrap(), 1);
    engine.delete_documents(&[]).unwrap();
    assert_eq!(engine.count_documents().unwrap(), 1);
}

#[test]
fn stored_documents_round_trip_every_field() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let doc = Document::new("payload")
        .with_meta_entry("tags", json!(["a", "b"]))
        .with_dataframe(json!({"rows": [[1, 2], [3, 4]]}))
        .with_blob(vec![0xde, 0xad, 0xbe, 0xef])
        .with_embedding(vec![0.25, 0.5]);
    engine.write_documents(&[doc.clone()], DuplicatePolicy::Fail).unwrap();

    let all = engine.filter_documents(None).unwrap();
    assert_eq!(all, vec![doc]);
}
