//! Retrieval requests and results shared by the store and its retrievers.

mod request;
mod result;

pub use request::{HighlightOptions, LexicalRequest, SnippetOptions, VectorRequest};
pub use result::RetrievedDocument;
