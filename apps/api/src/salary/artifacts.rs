//! Trained artifacts on disk: `model.json`, `scaler.json` and `schema.json`.
//!
//! The schema pins the exact column list and the dataset snapshot the model was
//! trained against. `verify` rejects any drift before the predictor serves.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::salary::error::ArtifactError;
use crate::salary::features::FeatureSpace;
use crate::salary::model::{LinearModel, MinMaxScaler};

pub const SCHEMA_VERSION: u32 = 1;

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const SCHEMA_FILE: &str = "schema.json";

/// Versioned description of the training feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub version: u32,
    pub columns: Vec<String>,
    pub dataset_sha256: String,
    pub trained_at: DateTime<Utc>,
    #[serde(default)]
    pub train_r2: Option<f64>,
    #[serde(default)]
    pub test_r2: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: LinearModel,
    pub scaler: MinMaxScaler,
    pub schema: ModelSchema,
}

impl ModelArtifacts {
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let artifacts = Self {
            model: read_json(&dir.join(MODEL_FILE))?,
            scaler: read_json(&dir.join(SCALER_FILE))?,
            schema: read_json(&dir.join(SCHEMA_FILE))?,
        };
        info!(
            "Loaded salary model artifacts from {} (schema v{}, {} features, trained {})",
            dir.display(),
            artifacts.schema.version,
            artifacts.model.n_features(),
            artifacts.schema.trained_at
        );
        Ok(artifacts)
    }

    pub fn save(&self, dir: &Path) -> Result<(), ArtifactError> {
        std::fs::create_dir_all(dir).map_err(|e| ArtifactError::io(dir, e))?;
        write_json(&dir.join(MODEL_FILE), &self.model)?;
        write_json(&dir.join(SCALER_FILE), &self.scaler)?;
        write_json(&dir.join(SCHEMA_FILE), &self.schema)?;
        Ok(())
    }

    /// Checks the artifacts against the feature space derived from the live dataset.
    pub fn verify(&self, space: &FeatureSpace, dataset_sha256: &str) -> Result<(), ArtifactError> {
        if self.schema.version != SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedSchema {
                found: self.schema.version,
                expected: SCHEMA_VERSION,
            });
        }

        if self.model.n_features() != space.len() {
            return Err(ArtifactError::DimensionMismatch {
                expected: self.model.n_features(),
                actual: space.len(),
            });
        }

        if self.schema.columns.len() != space.len() {
            return Err(ArtifactError::DimensionMismatch {
                expected: self.schema.columns.len(),
                actual: space.len(),
            });
        }

        if let Some((index, (expected, actual))) = self
            .schema
            .columns
            .iter()
            .zip(space.columns())
            .enumerate()
            .find(|(_, (expected, actual))| expected != actual)
        {
            return Err(ArtifactError::ColumnMismatch {
                index,
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }

        if self.schema.dataset_sha256 != dataset_sha256 {
            return Err(ArtifactError::DatasetMismatch {
                expected: self.schema.dataset_sha256.clone(),
                actual: dataset_sha256.to_string(),
            });
        }

        self.scaler.validate()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|e| ArtifactError::io(path, e))
}
