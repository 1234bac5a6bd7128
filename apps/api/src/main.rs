use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use genjob_api::config::Config;
use genjob_api::llm_client::{self, LlmClient};
use genjob_api::resume::drafter::LlmSectionDrafter;
use genjob_api::routes::build_router;
use genjob_api::salary::stats::GraphData;
use genjob_api::salary::SalaryPredictor;
use genjob_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GenJob API v{}", env!("CARGO_PKG_VERSION"));

    // Load salary dataset and model artifacts. A schema or dataset mismatch is fatal.
    let predictor = SalaryPredictor::load(&config.salary_dataset_path, &config.salary_model_dir)
        .with_context(|| {
            format!(
                "Failed to load salary model from {} (dataset {})",
                config.salary_model_dir.display(),
                config.salary_dataset_path.display()
            )
        })?;

    let graph_data = GraphData::from_records(predictor.dataset().records());

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        predictor: Arc::new(predictor),
        graph_data: Arc::new(graph_data),
        drafter: Arc::new(LlmSectionDrafter::new(llm)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
