//! Axum route handlers for the salary API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::salary::dataset::CompanyProfile;
use crate::salary::features::{CategoricalField, SalaryQuery};
use crate::salary::stats::GraphData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub company_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyDataRequest {
    pub company_name: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyDataResponse {
    pub data: CompanyProfile,
}

#[derive(Debug, Deserialize)]
pub struct PredictSalaryRequest {
    pub company_name: String,
    pub job_role: String,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PredictSalaryResponse {
    /// Currency string, e.g. `₹568,750.00`.
    pub predicted_salary: String,
    pub value: f64,
    /// Fields whose value was never seen in training and did not contribute.
    pub unknown_fields: Vec<CategoricalField>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /get-company-names
pub async fn handle_company_names(State(state): State<AppState>) -> Json<CompanyListResponse> {
    Json(CompanyListResponse {
        company_list: state.predictor.list_companies().to_vec(),
    })
}

/// POST /get-other-data
///
/// Case-insensitive lookup. Unknown companies return empty lists.
pub async fn handle_company_data(
    State(state): State<AppState>,
    Json(request): Json<CompanyDataRequest>,
) -> Json<CompanyDataResponse> {
    let data = state.predictor.describe_company(&request.company_name);
    debug!(
        "Company lookup '{}': {} roles, {} locations",
        request.company_name,
        data.job_roles.len(),
        data.location.len()
    );
    Json(CompanyDataResponse { data })
}

/// POST /predict-salary
pub async fn handle_predict_salary(
    State(state): State<AppState>,
    Json(request): Json<PredictSalaryRequest>,
) -> Json<PredictSalaryResponse> {
    let query = SalaryQuery::new(
        request.company_name,
        request.job_role,
        request.location,
        request.status,
    );
    let prediction = state.predictor.predict(&query);

    Json(PredictSalaryResponse {
        predicted_salary: prediction.formatted(),
        value: prediction.value(),
        unknown_fields: prediction.dropped_fields().to_vec(),
    })
}

/// GET /get-graph-data
pub async fn handle_graph_data(State(state): State<AppState>) -> Json<GraphData> {
    Json(state.graph_data.as_ref().clone())
}
