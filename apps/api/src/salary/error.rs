use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the dataset and trained artifacts, or while
/// training new ones. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset contains no rows with a salary")]
    EmptyDataset,

    #[error("model expects {expected} features but the feature space has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("schema version {found} is not supported (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },

    #[error("schema column {index} is '{expected}' but the dataset produces '{actual}'")]
    ColumnMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("dataset fingerprint {actual} does not match the trained snapshot {expected}")]
    DatasetMismatch { expected: String, actual: String },

    #[error("invalid scaler: {0}")]
    InvalidScaler(String),
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.into(),
            source,
        }
    }
}
