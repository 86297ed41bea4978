use std::path::Path;

use serde::{Deserialize, Serialize};

use super::component::{ComponentData, ComponentKind};
use crate::constants::{DOCUMENT_STORE_TYPE, IN_MEMORY_DATABASE};
use crate::errors::{DocStoreError, DocStoreResult};

/// Distance used by the vector index. Lower distance is a better match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityFunction {
    /// Negated dot product.
    #[default]
    DotProduct,
    /// One minus cosine similarity.
    Cosine,
}

/// FTS5 tokenizer backing the lexical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtsTokenizer {
    /// Substring matching on 3-character windows.
    #[default]
    Trigram,
    /// Porter stemming over unicode61.
    Porter,
    Unicode61,
}

impl FtsTokenizer {
    /// The `tokenize` argument for `CREATE VIRTUAL TABLE ... USING fts5`.
    pub fn as_fts5_arg(self) -> &'static str {
        match self {
            Self::Trigram => "trigram",
            Self::Porter => "porter unicode61",
            Self::Unicode61 => "unicode61",
        }
    }
}

/// Everything needed to open a document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStoreConfig {
    /// Database file path, or `:memory:`.
    pub database: String,
    /// Maintain the FTS5 lexical index.
    pub use_bm25: bool,
    /// Vector index dimensionality. `None` disables the vector index.
    pub embedding_dims: Option<usize>,
    pub embedding_similarity_function: SimilarityFunction,
    pub fts_tokenizer: FtsTokenizer,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            database: IN_MEMORY_DATABASE.to_string(),
            use_bm25: true,
            embedding_dims: None,
            embedding_similarity_function: SimilarityFunction::default(),
            fts_tokenizer: FtsTokenizer::default(),
        }
    }
}

impl ComponentKind for DocumentStoreConfig {
    const TYPE_NAME: &'static str = DOCUMENT_STORE_TYPE;
}

impl DocumentStoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_bm25(mut self, enabled: bool) -> Self {
        self.use_bm25 = enabled;
        self
    }

    pub fn with_embeddings(mut self, dims: usize, similarity: SimilarityFunction) -> Self {
        self.embedding_dims = Some(dims);
        self.embedding_similarity_function = similarity;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: FtsTokenizer) -> Self {
        self.fts_tokenizer = tokenizer;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }

    pub fn vector_index_enabled(&self) -> bool {
        self.embedding_dims.is_some()
    }

    /// Reject configurations that can never open.
    pub fn validate(&self) -> DocStoreResult<()> {
        if self.database.trim().is_empty() {
            return Err(DocStoreError::configuration("database path is empty"));
        }
        if self.embedding_dims == Some(0) {
            return Err(DocStoreError::configuration(
                "embedding_dims must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> DocStoreResult<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| DocStoreError::configuration(format!("invalid store config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> DocStoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DocStoreError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_component(&self) -> DocStoreResult<ComponentData> {
        ComponentData::from_config(self)
    }

    pub fn from_component(data: &ComponentData) -> DocStoreResult<Self> {
        let config: Self = data.into_config()?;
        config
            .validate()
            .map_err(|e| DocStoreError::deserialization(e.to_string()))?;
        Ok(config)
    }
}
