pub mod config;
pub mod store;

pub use config::{ArtifactConfig, VariantConfig};
pub use store::{ArtifactStore, ModelVariant};
