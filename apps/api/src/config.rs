use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub salary_dataset_path: PathBuf,
    pub salary_model_dir: PathBuf,
    pub latex_compile_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            salary_dataset_path: env_or(
                "SALARY_DATASET_PATH",
                "data/Salary_Dataset_with_Extra_Features.csv",
            )
            .into(),
            salary_model_dir: env_or("SALARY_MODEL_DIR", "pre_trained/salary_2022").into(),
            latex_compile_url: env_or("LATEX_COMPILE_URL", "https://latexonline.cc/compile"),
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
