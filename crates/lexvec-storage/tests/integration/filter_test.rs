//! Integration test: compiled filters against a seeded store.

use lexvec_core::{
    DocStoreError, Document, DocumentStoreConfig, DuplicatePolicy, FilterError, FilterExpression,
    IDocumentStore,
};
use lexvec_storage::StorageEngine;
use serde_json::json;

use crate::common::{ids, store_with};

#[test]
fn meta_equality_selects_one_document() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let docs = [
        Document::new("first").with_meta_entry("number", 1),
        Document::new("second").with_meta_entry("number", 2),
    ];
    engine.write_documents(&docs, DuplicatePolicy::Fail).unwrap();

    let filter = FilterExpression::from_value(&json!({
        "field": "meta.number", "operator": "==", "value": 1
    }))
    .unwrap();
    let found = engine.filter_documents(Some(&filter)).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content.as_deref(), Some("first"));
}

#[test]
fn golden_filter_cases() {
    for file in test_fixtures::load_filter_cases() {
        let engine = store_with(&file.documents, DocumentStoreConfig::in_memory());
        for case in &file.cases {
            let filter = FilterExpression::from_value(&case.filter)
                .unwrap_or_else(|e| panic!("{}: invalid filter: {e}", case.name));
            let found = engine
                .filter_documents(Some(&filter))
                .unwrap_or_else(|e| panic!("{}: {e}", case.name));
            assert_eq!(ids(&found), case.expected_ids, "case {}", case.name);
        }
    }
}

#[test]
fn invalid_filters_fail_before_execution() {
    let engine = store_with("filterable_docs.json", DocumentStoreConfig::in_memory());
    let filter = FilterExpression::from_value(&json!({
        "field": "meta.name", "operator": ">", "value": "name_0"
    }))
    .unwrap();
    assert!(matches!(
        engine.filter_documents(Some(&filter)),
        Err(DocStoreError::Filter(FilterError::NotIsoDate { .. }))
    ));
}
