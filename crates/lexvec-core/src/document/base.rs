use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored unit of retrieval.
///
/// `id` is unique across the store. `score` is populated by retrieval,
/// never by the caller. `dataframe` and `blob` are opaque payloads that
/// pass through storage unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub dataframe: Option<Value>,
    #[serde(default)]
    pub blob: Option<Vec<u8>>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Create a document whose id is derived from its content.
    pub fn new(content: impl Into<String>) -> Self {
        let mut doc = Self {
            content: Some(content.into()),
            ..Self::default()
        };
        doc.id = doc.content_id();
        doc
    }

    /// Pin an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_meta(self, meta: Map<String, Value>) -> Self {
        self.rehash_after(|doc| doc.meta = meta)
    }

    /// Set a single metadata entry.
    pub fn with_meta_entry(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let (key, value) = (key.into(), value.into());
        self.rehash_after(|doc| {
            doc.meta.insert(key, value);
        })
    }

    pub fn with_embedding(self, embedding: Vec<f32>) -> Self {
        self.rehash_after(|doc| doc.embedding = Some(embedding))
    }

    pub fn with_dataframe(self, dataframe: Value) -> Self {
        self.rehash_after(|doc| doc.dataframe = Some(dataframe))
    }

    pub fn with_blob(self, blob: Vec<u8>) -> Self {
        self.rehash_after(|doc| doc.blob = Some(blob))
    }

    /// Deterministic id over everything except `id` and `score`.
    pub fn content_id(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hash_field(&mut hasher, "content", self.content.as_deref().map(str::as_bytes));
        let dataframe = self.dataframe.as_ref().map(Value::to_string);
        hash_field(&mut hasher, "dataframe", dataframe.as_deref().map(str::as_bytes));
        hash_field(&mut hasher, "blob", self.blob.as_deref());
        let meta = Value::Object(self.meta.clone()).to_string();
        hash_field(&mut hasher, "meta", Some(meta.as_bytes()));
        let embedding = self.embedding.as_ref().map(|e| {
            e.iter()
                .flat_map(|f| f.to_le_bytes())
                .collect::<Vec<u8>>()
        });
        hash_field(&mut hasher, "embedding", embedding.as_deref());
        hasher.finalize().to_hex().to_string()
    }

    /// Apply a mutation; if the id was generated, regenerate it afterwards.
    fn rehash_after(mut self, mutate: impl FnOnce(&mut Self)) -> Self {
        let generated = self.id.is_empty() || self.id == self.content_id();
        mutate(&mut self);
        if generated {
            self.id = self.content_id();
        }
        self
    }
}

fn hash_field(hasher: &mut blake3::Hasher, name: &str, bytes: Option<&[u8]>) {
    hasher.update(name.as_bytes());
    match bytes {
        Some(b) => {
            hasher.update(&[1]);
            hasher.update(&(b.len() as u64).to_le_bytes());
            hasher.update(b);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}
