//! Fits the salary model offline and writes the artifacts the API loads.
//!
//! Usage: `train-salary-model [DATASET_CSV] [MODEL_DIR]`
//! Arguments fall back to `SALARY_DATASET_PATH` and `SALARY_MODEL_DIR`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use genjob_api::salary::dataset::SalaryDataset;
use genjob_api::salary::training::{train, TrainingConfig};

const DEFAULT_DATASET: &str = "data/Salary_Dataset_with_Extra_Features.csv";
const DEFAULT_MODEL_DIR: &str = "pre_trained/salary_2022";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let dataset_path = path_arg(args.next(), "SALARY_DATASET_PATH", DEFAULT_DATASET);
    let model_dir = path_arg(args.next(), "SALARY_MODEL_DIR", DEFAULT_MODEL_DIR);

    let dataset = SalaryDataset::load(&dataset_path)
        .with_context(|| format!("Failed to read dataset {}", dataset_path.display()))?;
    info!(
        "Loaded {} rows from {} ({})",
        dataset.records().len(),
        dataset_path.display(),
        dataset.fingerprint()
    );

    let report = train(&dataset, &TrainingConfig::default())?;
    let schema = &report.artifacts.schema;
    info!(
        "Trained on {} rows, tested on {} ({} rounds)",
        report.n_train, report.n_test, report.rounds
    );
    info!(
        "R² train: {}, test: {}",
        fmt_score(schema.train_r2),
        fmt_score(schema.test_r2)
    );

    report
        .artifacts
        .save(&model_dir)
        .with_context(|| format!("Failed to write artifacts to {}", model_dir.display()))?;
    info!("Artifacts written to {}", model_dir.display());

    Ok(())
}

fn path_arg(arg: Option<String>, key: &str, default: &str) -> PathBuf {
    arg.or_else(|| std::env::var(key).ok())
        .unwrap_or_else(|| default.to_string())
        .into()
}

fn fmt_score(score: Option<f64>) -> String {
    score.map_or_else(|| "n/a".to_string(), |s| format!("{s:.4}"))
}
