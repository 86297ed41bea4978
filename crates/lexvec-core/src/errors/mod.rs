//! Error taxonomy. Every fallible operation returns [`DocStoreResult`].

mod filter_error;
mod storage_error;
mod validation_error;

pub use filter_error::FilterError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Top-level error for the document store and its retrievers.
#[derive(Debug, thiserror::Error)]
pub enum DocStoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("duplicate document: id '{id}' already exists")]
    DuplicateDocument { id: String },

    #[error("deserialization error: {reason}")]
    Deserialization { reason: String },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DocStoreResult<T> = Result<T, DocStoreError>;

impl DocStoreError {
    pub fn deserialization(reason: impl Into<String>) -> Self {
        Self::Deserialization {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
