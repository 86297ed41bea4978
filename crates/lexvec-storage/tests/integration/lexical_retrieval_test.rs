//! Integration test: BM25 retrieval, snippets, highlights.

use lexvec_core::{
    DocStoreError, DocumentStoreConfig, FilterExpression, FtsTokenizer, HighlightOptions,
    IDocumentStore, LexicalRequest, RetrievedDocument, SnippetOptions, ValidationError,
};
use serde_json::json;

use crate::common::{lexical_store, store_with};

#[test]
fn top_k_limits_lexical_hits() {
    let engine = lexical_store();
    let request = LexicalRequest::new("fox").unwrap().with_top_k(Some(1)).unwrap();
    let hits = engine.bm25_retrieval(&request).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].document.content.as_deref().unwrap().contains("fox"));
    assert!(hits[0].score().is_some());
}

#[test]
fn scores_ascend_and_only_matches_return() {
    let engine = lexical_store();
    let hits = engine.bm25_retrieval(&LexicalRequest::new("fox").unwrap()).unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"l1") && ids.contains(&"l2"));
    assert!(hits[0].score().unwrap() <= hits[1].score().unwrap());
}

#[test]
fn filters_apply_to_lexical_hits() {
    let engine = lexical_store();
    let filter = FilterExpression::from_value(&json!({
        "field": "meta.n", "operator": "==", "value": 2
    }))
    .unwrap();
    let request = LexicalRequest::new("fox").unwrap().with_filters(Some(filter));
    let hits = engine.bm25_retrieval(&request).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.id, "l2");
}

#[test]
fn snippet_and_highlight_land_in_aux() {
    let engine = store_with(
        "lexical_corpus.json",
        DocumentStoreConfig::in_memory().with_tokenizer(FtsTokenizer::Unicode61),
    );
    let request = LexicalRequest::new("lazy")
        .unwrap()
        .with_snippet(SnippetOptions::new(4).unwrap())
        .with_highlight(HighlightOptions::default());
    let hits = engine.bm25_retrieval(&request).unwrap();
    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert!(hit.snippet().unwrap().contains("<b>lazy</b>"));
    assert_eq!(
        hit.highlight().unwrap(),
        "The quick brown fox jumps over the <b>lazy</b> dog"
    );
    // Caller metadata is untouched.
    assert!(!hit.document.meta.contains_key("snippet"));

    let request = LexicalRequest::new("lazy")
        .unwrap()
        .with_snippet(
            SnippetOptions::new(4)
                .unwrap()
                .with_markers("[", "]")
                .with_ellipsis("..."),
        );
    let hits = engine.bm25_retrieval(&request).unwrap();
    let snippet = hits[0].snippet().unwrap();
    assert!(snippet.contains("[lazy]"));
    // The excerpt can't start at the first token, so it is elided.
    assert!(snippet.starts_with("..."));
    assert!(hits[0].highlight().is_none());
}

#[test]
fn unparseable_query_is_sanitized() {
    let engine = lexical_store();
    let hits = engine
        .bm25_retrieval(&LexicalRequest::new("fox)").unwrap())
        .unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn query_of_only_syntax_is_a_validation_error() {
    let engine = lexical_store();
    assert!(matches!(
        engine.bm25_retrieval(&LexicalRequest::new("\"(").unwrap()),
        Err(DocStoreError::Validation(ValidationError::EmptyQuery))
    ));
}

#[test]
fn hyphenated_query_is_retried_as_terms() {
    let engine = lexical_store();
    let hits = engine
        .bm25_retrieval(&LexicalRequest::new("quick-brown").unwrap())
        .unwrap();
    assert_eq!(ids(&hits), vec!["l1"]);
}

#[test]
fn column_prefix_query_is_retried_as_terms() {
    let engine = lexical_store();
    let hits = engine
        .bm25_retrieval(&LexicalRequest::new("lazy: fox").unwrap())
        .unwrap();
    assert_eq!(ids(&hits), vec!["l1"]);

    // Every term must still match; an unknown word just finds nothing.
    let hits = engine
        .bm25_retrieval(&LexicalRequest::new("note: fox").unwrap())
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn trailing_keyword_is_dropped_on_retry() {
    let engine = lexical_store();
    let hits = engine
        .bm25_retrieval(&LexicalRequest::new("fox AND").unwrap())
        .unwrap();
    let mut found = ids(&hits);
    found.sort_unstable();
    assert_eq!(found, vec!["l1", "l2"]);
}

fn ids(hits: &[RetrievedDocument]) -> Vec<&str> {
    hits.iter().map(|h| h.document.id.as_str()).collect()
}
