//! The canonical document value and write-conflict policy.

mod base;
mod duplicate_policy;

pub use base::Document;
pub use duplicate_policy::DuplicatePolicy;
