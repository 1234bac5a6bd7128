//! Offline trainer for the salary model.
//!
//! Flow: derive feature space → fit scaler on salary → seeded train/test split →
//! coordinate descent on squared loss → R² report → artifacts.
//!
//! One-hot rows have at most four hot columns, so features are stored as
//! per-column row lists and every update only touches the rows it affects.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::salary::artifacts::{ModelArtifacts, ModelSchema, SCHEMA_VERSION};
use crate::salary::dataset::SalaryDataset;
use crate::salary::error::ArtifactError;
use crate::salary::features::FeatureSpace;
use crate::salary::model::{LinearModel, MinMaxScaler};

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Fraction of rows held out for the test score (rounded up).
    pub test_fraction: f64,
    pub seed: u64,
    /// L2 strength. Keeps the collinear one-hot blocks identifiable.
    pub lambda: f64,
    pub max_rounds: usize,
    /// Stop once the largest weight change in a round falls below this.
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.33,
            seed: 42,
            lambda: 1e-6,
            max_rounds: 2000,
            tolerance: 1e-10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub artifacts: ModelArtifacts,
    pub n_train: usize,
    pub n_test: usize,
    pub rounds: usize,
}

/// A training row: indices of its hot columns and its scaled target.
struct Sample {
    hot: Vec<usize>,
    target: f64,
}

pub fn train(dataset: &SalaryDataset, config: &TrainingConfig) -> Result<TrainingReport, ArtifactError> {
    let space = FeatureSpace::from_records(dataset.records());

    let labelled: Vec<_> = dataset
        .records()
        .iter()
        .filter_map(|r| r.salary.map(|s| (r, s)))
        .collect();
    if labelled.is_empty() {
        return Err(ArtifactError::EmptyDataset);
    }

    let salaries: Vec<f64> = labelled.iter().map(|(_, s)| *s).collect();
    let scaler = MinMaxScaler::fit(&salaries)?;

    let mut samples: Vec<Sample> = labelled
        .iter()
        .map(|(record, salary)| Sample {
            hot: space
                .encode_record(record)
                .iter()
                .enumerate()
                .filter(|(_, v)| **v != 0.0)
                .map(|(i, _)| i)
                .collect(),
            target: scaler.transform(*salary),
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    samples.shuffle(&mut rng);

    let n = samples.len();
    let n_test = ((n as f64 * config.test_fraction).ceil() as usize).min(n - 1);
    let (test, train_set) = samples.split_at(n_test);

    info!(
        "Training on {} rows ({} held out), {} features",
        train_set.len(),
        test.len(),
        space.len()
    );

    let (model, rounds) = fit_coordinate_descent(train_set, space.len(), config);

    let train_r2 = r2_score(&model, train_set);
    let test_r2 = r2_score(&model, test);
    info!(
        "Fitted in {} rounds: train R² {:?}, test R² {:?}",
        rounds, train_r2, test_r2
    );

    let schema = ModelSchema {
        version: SCHEMA_VERSION,
        columns: space.columns().to_vec(),
        dataset_sha256: dataset.fingerprint().to_string(),
        trained_at: Utc::now(),
        train_r2,
        test_r2,
    };

    Ok(TrainingReport {
        artifacts: ModelArtifacts {
            model,
            scaler,
            schema,
        },
        n_train: train_set.len(),
        n_test,
        rounds,
    })
}

/// Sequential coordinate descent with exact residual updates.
fn fit_coordinate_descent(
    samples: &[Sample],
    n_features: usize,
    config: &TrainingConfig,
) -> (LinearModel, usize) {
    let mut rows_by_feature: Vec<Vec<usize>> = vec![Vec::new(); n_features];
    for (row, sample) in samples.iter().enumerate() {
        for &j in &sample.hot {
            rows_by_feature[j].push(row);
        }
    }

    let mut coefficients = vec![0.0; n_features];
    let mut intercept = 0.0;
    let mut residuals: Vec<f64> = samples.iter().map(|s| s.target).collect();
    let n = samples.len() as f64;

    let mut rounds = 0;
    while rounds < config.max_rounds {
        rounds += 1;

        let bias_delta = residuals.iter().sum::<f64>() / n;
        intercept += bias_delta;
        residuals.iter_mut().for_each(|r| *r -= bias_delta);
        let mut max_delta = bias_delta.abs();

        for (j, rows) in rows_by_feature.iter().enumerate() {
            if rows.is_empty() {
                continue;
            }
            let sum_residual: f64 = rows.iter().map(|&i| residuals[i]).sum();
            let delta =
                (sum_residual - config.lambda * coefficients[j]) / (rows.len() as f64 + config.lambda);
            if delta == 0.0 {
                continue;
            }
            coefficients[j] += delta;
            for &i in rows {
                residuals[i] -= delta;
            }
            max_delta = max_delta.max(delta.abs());
        }

        if rounds % 100 == 0 {
            debug!("round {rounds}: max weight change {max_delta:e}");
        }
        if max_delta < config.tolerance {
            break;
        }
    }

    (
        LinearModel {
            intercept,
            coefficients,
        },
        rounds,
    )
}

/// Coefficient of determination. `None` when undefined (no rows or constant target).
fn r2_score(model: &LinearModel, samples: &[Sample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mean = samples.iter().map(|s| s.target).sum::<f64>() / samples.len() as f64;

    let (ss_res, ss_tot) = samples.iter().fold((0.0, 0.0), |(res, tot), s| {
        let pred = model.intercept + s.hot.iter().map(|&j| model.coefficients[j]).sum::<f64>();
        (
            res + (s.target - pred).powi(2),
            tot + (s.target - mean).powi(2),
        )
    });

    (ss_tot > 0.0).then(|| 1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::features::SalaryQuery;
    use crate::salary::fixtures::fixture_dataset;
    use crate::salary::predictor::SalaryPredictor;

    /// Salaries generated from an exact additive rule, so a linear fit can recover them.
    fn additive_dataset() -> SalaryDataset {
        let companies = [("Acme", 100_000.0), ("Globex", 200_000.0), ("Initech", 50_000.0)];
        let titles = [("Engineer", 300_000.0), ("Analyst", 150_000.0)];
        let locations = [("Pune", 0.0), ("Mumbai", 80_000.0)];
        let statuses = [("Full Time", 40_000.0), ("Intern", -20_000.0)];

        let mut csv = String::from("Company Name,Job Title,Location,Salary,Employment Status\n");
        for (c, cv) in companies {
            for (t, tv) in titles {
                for (l, lv) in locations {
                    for (s, sv) in statuses {
                        let salary = 200_000.0 + cv + tv + lv + sv;
                        csv.push_str(&format!("{c},{t},{l},{salary},{s}\n"));
                    }
                }
            }
        }
        SalaryDataset::from_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_training_produces_verifiable_artifacts() {
        let dataset = fixture_dataset();
        let report = train(&dataset, &TrainingConfig::default()).unwrap();

        // 7 labelled rows, ceil(7 * 0.33) = 3 held out
        assert_eq!(report.n_test, 3);
        assert_eq!(report.n_train, 4);
        assert_eq!(report.artifacts.model.n_features(), 11);
        assert_eq!(report.artifacts.scaler.data_min, 350_000.0);
        assert_eq!(report.artifacts.scaler.data_max, 700_000.0);

        // Trained artifacts load straight into a predictor
        SalaryPredictor::new(dataset, report.artifacts).unwrap();
    }

    #[test]
    fn test_training_is_deterministic_for_a_seed() {
        let dataset = fixture_dataset();
        let a = train(&dataset, &TrainingConfig::default()).unwrap();
        let b = train(&dataset, &TrainingConfig::default()).unwrap();
        assert_eq!(a.artifacts.model, b.artifacts.model);
    }

    #[test]
    fn test_recovers_additive_salaries() {
        let dataset = additive_dataset();
        let config = TrainingConfig {
            test_fraction: 0.0,
            ..TrainingConfig::default()
        };
        let report = train(&dataset, &config).unwrap();
        assert_eq!(report.n_test, 0);
        assert!(report.artifacts.schema.test_r2.is_none());
        assert!(report.artifacts.schema.train_r2.unwrap() > 0.999);

        let predictor = SalaryPredictor::new(dataset, report.artifacts).unwrap();
        let prediction =
            predictor.predict(&SalaryQuery::new("Globex", "Engineer", "Mumbai", "Full Time"));
        let expected = 200_000.0 + 200_000.0 + 300_000.0 + 80_000.0 + 40_000.0;
        assert!(
            (prediction.value() - expected).abs() < 1_000.0,
            "predicted {} expected {}",
            prediction.value(),
            expected
        );
    }

    #[test]
    fn test_rejects_dataset_without_salaries() {
        let csv = "Company Name,Job Title,Location,Salary,Employment Status\nIBM,Dev,Pune,,Intern\n";
        let dataset = SalaryDataset::from_bytes(csv.as_bytes()).unwrap();
        assert!(matches!(
            train(&dataset, &TrainingConfig::default()),
            Err(ArtifactError::EmptyDataset)
        ));
    }

    #[test]
    fn test_single_row_keeps_it_for_training() {
        let csv = "Company Name,Job Title,Location,Salary,Employment Status\nIBM,Dev,Pune,500000,Intern\n";
        let dataset = SalaryDataset::from_bytes(csv.as_bytes()).unwrap();
        let report = train(&dataset, &TrainingConfig::default()).unwrap();
        assert_eq!(report.n_train, 1);
        assert_eq!(report.n_test, 0);
    }
}
