//! Fitted linear model and min-max output scaler.

use serde::{Deserialize, Serialize};

use crate::salary::error::ArtifactError;

/// `y = intercept + coefficients · x`, with `x` laid out in feature-space order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Caller guarantees `features.len() == self.n_features()`.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        self.intercept + dot
    }
}

/// Min-max scaler over a single column, compatible with scikit-learn's
/// `MinMaxScaler`: `transform(x) = x * scale + min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: f64,
    pub data_max: f64,
    pub feature_range: (f64, f64),
}

impl MinMaxScaler {
    /// Fits on the observed values with target range [0, 1].
    pub fn fit(values: &[f64]) -> Result<Self, ArtifactError> {
        if values.is_empty() {
            return Err(ArtifactError::EmptyDataset);
        }
        let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let scaler = Self {
            data_min,
            data_max,
            feature_range: (0.0, 1.0),
        };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let (lo, hi) = self.feature_range;
        if !(self.data_min.is_finite() && self.data_max.is_finite()) {
            return Err(ArtifactError::InvalidScaler(
                "data range must be finite".to_string(),
            ));
        }
        if self.data_min > self.data_max {
            return Err(ArtifactError::InvalidScaler(format!(
                "data_min {} exceeds data_max {}",
                self.data_min, self.data_max
            )));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ArtifactError::InvalidScaler(format!(
                "feature range ({lo}, {hi}) must be increasing"
            )));
        }
        Ok(())
    }

    pub fn scale(&self) -> f64 {
        let (lo, hi) = self.feature_range;
        let data_range = self.data_max - self.data_min;
        // A constant column keeps unit scale.
        let data_range = if data_range == 0.0 { 1.0 } else { data_range };
        (hi - lo) / data_range
    }

    pub fn min(&self) -> f64 {
        self.feature_range.0 - self.data_min * self.scale()
    }

    pub fn transform(&self, value: f64) -> f64 {
        value * self.scale() + self.min()
    }

    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        (scaled - self.min()) / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_linear_model_predict() {
        let model = LinearModel {
            intercept: 0.5,
            coefficients: vec![1.0, -2.0, 0.25],
        };
        assert_eq!(model.n_features(), 3);
        assert!(approx(model.predict(&[1.0, 0.0, 1.0]), 1.75));
        assert!(approx(model.predict(&[0.0, 0.0, 0.0]), 0.5));
    }

    #[test]
    fn test_scaler_fit_maps_extremes_to_range() {
        let scaler = MinMaxScaler::fit(&[350_000.0, 700_000.0, 500_000.0]).unwrap();
        assert_eq!(scaler.data_min, 350_000.0);
        assert_eq!(scaler.data_max, 700_000.0);
        assert!(approx(scaler.transform(350_000.0), 0.0));
        assert!(approx(scaler.transform(700_000.0), 1.0));
        assert!(approx(scaler.transform(525_000.0), 0.5));
    }

    #[test]
    fn test_inverse_transform_recovers_currency_value() {
        let scaler = MinMaxScaler {
            data_min: 350_000.0,
            data_max: 700_000.0,
            feature_range: (0.0, 1.0),
        };
        assert!(approx(scaler.inverse_transform(0.625), 568_750.0));
        // Extrapolates linearly outside the fitted range
        assert!(approx(scaler.inverse_transform(-0.1), 315_000.0));
        assert!(approx(
            scaler.inverse_transform(scaler.transform(423_456.78)),
            423_456.78
        ));
    }

    #[test]
    fn test_constant_column_uses_unit_scale() {
        let scaler = MinMaxScaler::fit(&[42.0, 42.0]).unwrap();
        assert_eq!(scaler.scale(), 1.0);
        assert!(approx(scaler.transform(42.0), 0.0));
        assert!(approx(scaler.inverse_transform(0.0), 42.0));
    }

    #[test]
    fn test_custom_feature_range() {
        let scaler = MinMaxScaler {
            data_min: 0.0,
            data_max: 10.0,
            feature_range: (-1.0, 1.0),
        };
        assert!(approx(scaler.transform(5.0), 0.0));
        assert!(approx(scaler.inverse_transform(1.0), 10.0));
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        assert!(matches!(
            MinMaxScaler::fit(&[]),
            Err(ArtifactError::EmptyDataset)
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let scaler = MinMaxScaler {
            data_min: 10.0,
            data_max: 0.0,
            feature_range: (0.0, 1.0),
        };
        assert!(matches!(
            scaler.validate(),
            Err(ArtifactError::InvalidScaler(_))
        ));
    }
}
