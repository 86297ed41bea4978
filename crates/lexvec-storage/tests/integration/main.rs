//! Integration tests for the SQLite document store.

mod common;
mod document_crud_test;
mod filter_test;
mod index_sync_test;
mod lexical_retrieval_test;
mod vector_retrieval_test;
