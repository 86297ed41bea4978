//! Property tests: score scaling and argument validation.

use std::sync::Arc;

use proptest::prelude::*;

use lexvec_core::{DocStoreError, ValidationError};
use lexvec_retrieval::scoring::scale_bm25;
use lexvec_retrieval::{Bm25Retriever, EmbeddingRetriever};
use lexvec_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_scaling_is_bounded_and_monotonic(a in -500.0f64..500.0, b in -500.0f64..500.0) {
        let (sa, sb) = (scale_bm25(a), scale_bm25(b));
        prop_assert!((0.0..=1.0).contains(&sa));
        if a < b {
            prop_assert!(sa >= sb);
        }
    }

    #[test]
    fn prop_non_positive_top_k_always_rejected(top_k in i64::MIN..=0) {
        let store = Arc::new(StorageEngine::open_in_memory().unwrap());
        let bm25 = Bm25Retriever::with_defaults(store.clone());
        let is_invalid_top_k = matches!(
            bm25.run("fox", None, Some(top_k), None),
            Err(DocStoreError::Validation(ValidationError::InvalidTopK { .. }))
        );
        prop_assert!(is_invalid_top_k);

        let embedding = EmbeddingRetriever::with_defaults(store);
        let is_invalid_top_k = matches!(
            embedding.run(&[1.0], None, Some(top_k), None),
            Err(DocStoreError::Validation(ValidationError::InvalidTopK { .. }))
        );
        prop_assert!(is_invalid_top_k);
    }
}
