//! # lexvec-core
//!
//! Foundation crate for the lexvec document store.
//! Defines documents, the filter AST, retrieval requests, config, errors,
//! and the storage trait. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod filter;
pub mod retrieval;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{ComponentData, DocumentStoreConfig, FtsTokenizer, SimilarityFunction};
pub use document::{Document, DuplicatePolicy};
pub use errors::{DocStoreError, DocStoreResult, FilterError, StorageError, ValidationError};
pub use filter::{Comparison, ComparisonOperator, FilterExpression, Logical, LogicalOperator};
pub use retrieval::{
    HighlightOptions, LexicalRequest, RetrievedDocument, SnippetOptions, VectorRequest,
};
pub use traits::IDocumentStore;
