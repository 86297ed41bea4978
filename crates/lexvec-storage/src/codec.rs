//! Document codec: the mapping between [`Document`] and a `document` row.
//!
//! `meta` is always stored as a JSON object so `json_extract` filters work
//! on every row. `embedding` and `dataframe` are JSON text or NULL.

use rusqlite::Row;
use serde_json::{Map, Value};

use lexvec_core::errors::{DocStoreResult, StorageError};
use lexvec_core::Document;

/// Column list shared by every statement that reads whole documents.
pub const DOCUMENT_COLUMNS: &str = "id, content, dataframe, blob, meta, score, embedding";

/// Number of columns in [`DOCUMENT_COLUMNS`].
pub const DOCUMENT_COLUMN_COUNT: usize = 7;

/// A document in its stored representation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub content: Option<String>,
    pub dataframe: Option<String>,
    pub blob: Option<Vec<u8>>,
    pub meta: String,
    pub score: Option<f64>,
    pub embedding: Option<String>,
}

impl DocumentRecord {
    /// Read the [`DOCUMENT_COLUMNS`] starting at column `offset`.
    pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            content: row.get(offset + 1)?,
            dataframe: row.get(offset + 2)?,
            blob: row.get(offset + 3)?,
            meta: row.get::<_, Option<String>>(offset + 4)?.unwrap_or_default(),
            score: row.get(offset + 5)?,
            embedding: row.get(offset + 6)?,
        })
    }
}

pub fn encode(doc: &Document) -> DocStoreResult<DocumentRecord> {
    let dataframe = match &doc.dataframe {
        None | Some(Value::Null) => None,
        Some(frame) => Some(serde_json::to_string(frame)?),
    };
    let embedding = match &doc.embedding {
        Some(vector) => Some(serde_json::to_string(vector)?),
        None => None,
    };
    Ok(DocumentRecord {
        id: doc.id.clone(),
        content: doc.content.clone(),
        dataframe,
        blob: doc.blob.clone(),
        meta: serde_json::to_string(&doc.meta)?,
        score: doc.score,
        embedding,
    })
}

pub fn decode(record: DocumentRecord) -> DocStoreResult<Document> {
    let meta = decode_meta(&record.id, &record.meta)?;
    let dataframe = match non_null_json(record.dataframe.as_deref()) {
        Some(text) => Some(
            serde_json::from_str(text)
                .map_err(|e| malformed(&record.id, format!("dataframe: {e}")))?,
        ),
        None => None,
    };
    let embedding = match non_null_json(record.embedding.as_deref()) {
        Some(text) => Some(
            serde_json::from_str::<Vec<f32>>(text)
                .map_err(|e| malformed(&record.id, format!("embedding: {e}")))?,
        ),
        None => None,
    };
    Ok(Document {
        id: record.id,
        content: record.content,
        dataframe,
        blob: record.blob,
        meta,
        score: record.score,
        embedding,
    })
}

fn decode_meta(id: &str, text: &str) -> DocStoreResult<Map<String, Value>> {
    let Some(text) = non_null_json(Some(text)) else {
        return Ok(Map::new());
    };
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(malformed(id, format!("meta is not an object: {other}"))),
        Err(e) => Err(malformed(id, format!("meta: {e}"))),
    }
}

/// Blank text and JSON `null` both mean "absent".
fn non_null_json(text: Option<&str>) -> Option<&str> {
    text.map(str::trim)
        .filter(|t| !t.is_empty() && *t != "null")
}

fn malformed(id: &str, reason: String) -> lexvec_core::DocStoreError {
    StorageError::MalformedRecord {
        id: id.to_string(),
        reason,
    }
    .into()
}
