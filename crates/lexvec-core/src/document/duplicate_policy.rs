use serde::{Deserialize, Serialize};

/// What a write does when a document with the same id already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// No explicit policy; resolves to [`DuplicatePolicy::Fail`].
    #[default]
    None,
    /// Keep the stored document, ignore the new one.
    Skip,
    /// Replace the stored document with the new one.
    Overwrite,
    /// Reject the whole batch with `DuplicateDocument`.
    Fail,
}

impl DuplicatePolicy {
    /// Resolve `None` to the effective policy.
    pub fn resolve(self) -> Self {
        match self {
            Self::None => Self::Fail,
            other => other,
        }
    }
}
