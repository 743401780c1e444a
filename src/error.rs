use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the artifact set. Any of these is fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode artifact {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),

    #[error("no model variants configured")]
    NoModels,

    #[error("duplicate model variant name '{0}'")]
    DuplicateVariant(String),
}

/// Per-request failures. None of these are retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("{stage} expects {expected} features, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} expects column '{expected}' at position {position}, got '{found}'")]
    ColumnOrder {
        stage: &'static str,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("unknown model variant '{0}'")]
    UnknownModel(String),
}
