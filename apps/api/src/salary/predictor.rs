//! Salary predictor: the service object built once at startup.
//!
//! Owns the dataset, the feature space derived from it, and the verified model
//! and scaler. Nothing is mutated after construction, so a single instance is
//! shared across request handlers behind an `Arc` without locking.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::salary::artifacts::ModelArtifacts;
use crate::salary::dataset::{CompanyProfile, SalaryDataset};
use crate::salary::error::ArtifactError;
use crate::salary::features::{AlignedFeatures, CategoricalField, FeatureSpace, SalaryQuery};
use crate::salary::model::{LinearModel, MinMaxScaler};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Result of a prediction. Inputs with categories the model never saw still
/// produce a value, but the dropped fields are reported instead of hidden.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prediction {
    Predicted {
        value: f64,
    },
    PredictedWithUnknownCategories {
        value: f64,
        dropped_fields: Vec<CategoricalField>,
    },
}

impl Prediction {
    pub fn value(&self) -> f64 {
        match self {
            Prediction::Predicted { value }
            | Prediction::PredictedWithUnknownCategories { value, .. } => *value,
        }
    }

    pub fn dropped_fields(&self) -> &[CategoricalField] {
        match self {
            Prediction::Predicted { .. } => &[],
            Prediction::PredictedWithUnknownCategories { dropped_fields, .. } => dropped_fields,
        }
    }

    pub fn formatted(&self) -> String {
        format_currency(self.value())
    }
}

pub struct SalaryPredictor {
    dataset: SalaryDataset,
    space: FeatureSpace,
    model: LinearModel,
    scaler: MinMaxScaler,
    companies: Vec<String>,
}

impl SalaryPredictor {
    /// Loads the dataset and artifacts from disk and verifies they belong together.
    pub fn load(dataset_path: &Path, model_dir: &Path) -> Result<Self, ArtifactError> {
        let dataset = SalaryDataset::load(dataset_path)?;
        let artifacts = ModelArtifacts::load(model_dir)?;
        Self::new(dataset, artifacts)
    }

    pub fn new(dataset: SalaryDataset, artifacts: ModelArtifacts) -> Result<Self, ArtifactError> {
        let space = FeatureSpace::from_records(dataset.records());
        artifacts.verify(&space, dataset.fingerprint())?;

        let companies = dataset.list_companies();
        info!(
            "Salary predictor ready: {} features, {} companies",
            space.len(),
            companies.len()
        );

        Ok(Self {
            dataset,
            space,
            model: artifacts.model,
            scaler: artifacts.scaler,
            companies,
        })
    }

    pub fn feature_space(&self) -> &FeatureSpace {
        &self.space
    }

    pub fn dataset(&self) -> &SalaryDataset {
        &self.dataset
    }

    pub fn align(&self, query: &SalaryQuery) -> AlignedFeatures {
        self.space.align(query)
    }

    pub fn predict(&self, query: &SalaryQuery) -> Prediction {
        let aligned = self.space.align(query);
        let scaled = self.model.predict(&aligned.values);
        let value = self.scaler.inverse_transform(scaled);

        if aligned.unknown_fields.is_empty() {
            Prediction::Predicted { value }
        } else {
            warn!(
                "Salary prediction for {:?} ignored unknown categories: {:?}",
                query, aligned.unknown_fields
            );
            Prediction::PredictedWithUnknownCategories {
                value,
                dropped_fields: aligned.unknown_fields,
            }
        }
    }

    pub fn list_companies(&self) -> &[String] {
        &self.companies
    }

    pub fn describe_company(&self, company: &str) -> CompanyProfile {
        self.dataset.describe_company(company)
    }
}

/// Formats with the fixed currency symbol, thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY_SYMBOL}{value}");
    }

    let raw = format!("{value:.2}");
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{CURRENCY_SYMBOL}{sign}{grouped}.{frac_part}")
}
