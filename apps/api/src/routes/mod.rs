pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resume::handlers as resume;
use crate::salary::handlers as salary;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Salary API
        .route("/get-company-names", get(salary::handle_company_names))
        .route("/get-other-data", post(salary::handle_company_data))
        .route("/predict-salary", post(salary::handle_predict_salary))
        .route("/get-graph-data", get(salary::handle_graph_data))
        // Resume API
        .route("/generate_resume", post(resume::handle_generate_resume))
        .with_state(state)
}
