use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{HIGHLIGHT_KEY, SNIPPET_KEY};
use crate::document::Document;

/// A ranked hit. `document.score` carries the ranking score; `aux`
/// carries derived excerpts under reserved keys so that caller metadata
/// of the same name is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub document: Document,
    #[serde(default)]
    pub aux: Map<String, Value>,
}

impl RetrievedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            aux: Map::new(),
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.document.score
    }

    pub fn snippet(&self) -> Option<&str> {
        self.aux.get(SNIPPET_KEY).and_then(Value::as_str)
    }

    pub fn highlight(&self) -> Option<&str> {
        self.aux.get(HIGHLIGHT_KEY).and_then(Value::as_str)
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
