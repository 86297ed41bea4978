//! Store configuration and the host component protocol.

mod component;
mod store_config;

pub use component::{ComponentData, ComponentKind};
pub use store_config::{DocumentStoreConfig, FtsTokenizer, SimilarityFunction};
