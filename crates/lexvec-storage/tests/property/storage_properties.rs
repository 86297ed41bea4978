//! Property tests: placeholder/parameter agreement, codec and storage round trips.

use proptest::prelude::*;
use serde_json::{json, Value};

use lexvec_core::{Document, DuplicatePolicy, FilterExpression, IDocumentStore};
use lexvec_storage::codec::{decode, encode};
use lexvec_storage::{compile, StorageEngine};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn comparison() -> impl Strategy<Value = Value> {
    let key = "[a-z][a-z0-9_]{0,6}";
    prop_oneof![
        (key, scalar()).prop_map(|(k, v)| json!({"field": format!("meta.{k}"), "operator": "==", "value": v})),
        (key, scalar()).prop_map(|(k, v)| json!({"field": format!("meta.{k}"), "operator": "!=", "value": v})),
        (key, any::<i32>()).prop_map(|(k, v)| json!({"field": format!("meta.{k}"), "operator": ">=", "value": v})),
        (key, prop::collection::vec(scalar(), 0..4))
            .prop_map(|(k, v)| json!({"field": format!("meta.{k}"), "operator": "in", "value": v})),
        (key, prop::collection::vec(scalar(), 0..4))
            .prop_map(|(k, v)| json!({"field": format!("meta.{k}"), "operator": "not in", "value": v})),
    ]
}

fn filter_tree() -> impl Strategy<Value = Value> {
    comparison().prop_recursive(3, 24, 4, |inner| {
        (
            prop_oneof![Just("AND"), Just("OR"), Just("NOT")],
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(op, conditions)| json!({"operator": op, "conditions": conditions}))
    })
}

proptest! {
    #[test]
    fn prop_placeholders_match_parameters(raw in filter_tree()) {
        let filter = FilterExpression::from_value(&raw).unwrap();
        let compiled = compile(&filter).unwrap();
        prop_assert_eq!(compiled.placeholder_count(), compiled.parameters.len());
    }

    #[test]
    fn prop_compiled_filters_execute(raw in filter_tree()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let doc = Document::new("sample").with_meta_entry("a", 1);
        engine.write_documents(&[doc], DuplicatePolicy::Fail).unwrap();
        let filter = FilterExpression::from_value(&raw).unwrap();
        prop_assert!(engine.filter_documents(Some(&filter)).is_ok());
    }

    #[test]
    fn prop_codec_round_trip(
        content in proptest::option::of("[a-zA-Z0-9 ]{0,40}"),
        meta_value in scalar(),
        embedding in proptest::option::of(prop::collection::vec(-1000.0f32..1000.0, 0..8)),
        blob in proptest::option::of(prop::collection::vec(any::<u8>(), 0..16)),
    ) {
        let mut doc = Document::default().with_id("p");
        doc.content = content;
        doc.meta.insert("k".into(), meta_value);
        doc.embedding = embedding;
        doc.blob = blob;
        let back = decode(encode(&doc).unwrap()).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn prop_write_then_count(n in 1usize..20) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let docs: Vec<Document> = (0..n)
            .map(|i| Document::new(format!("doc {i}")))
            .collect();
        prop_assert_eq!(engine.write_documents(&docs, DuplicatePolicy::Fail).unwrap(), n);
        prop_assert_eq!(engine.count_documents().unwrap(), n);
        prop_assert_eq!(engine.write_documents(&docs, DuplicatePolicy::Skip).unwrap(), 0);
    }
}
