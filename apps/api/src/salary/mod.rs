// Salary prediction: dataset loading, one-hot feature alignment, the fitted
// linear model and scaler, and the descriptive statistics served beside them.
// Everything here is immutable once SalaryPredictor / GraphData are built.

pub mod artifacts;
pub mod dataset;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod predictor;
pub mod stats;
pub mod training;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::ArtifactError;
pub use predictor::{Prediction, SalaryPredictor};
