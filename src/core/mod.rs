pub mod feature_schema;
pub mod feature_vector;
pub mod raw_input;

pub use feature_schema::FeatureSchema;
pub use feature_vector::FeatureVector;
pub use raw_input::{RawInputRecord, RawValue};

/// Discrete class produced by a classifier.
pub type ClassCode = i64;
