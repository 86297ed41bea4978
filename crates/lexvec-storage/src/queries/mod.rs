//! Statements over the canonical `document` relation.

pub mod document_crud;
pub mod document_query;
