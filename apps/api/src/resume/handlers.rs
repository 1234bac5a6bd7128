//! Axum route handlers for the resume API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::resume::generator::generate_resume;
use crate::resume::models::ResumeGenRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub pdf_url: String,
}

/// POST /generate_resume
///
/// Drafts sections with the LLM, assembles the LaTeX document and returns the
/// compile-service URL for the PDF.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeGenRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let generated = generate_resume(
        state.drafter.as_ref(),
        &state.config.latex_compile_url,
        &request,
    )
    .await?;

    Ok(Json(GenerateResumeResponse {
        pdf_url: generated.pdf_url,
    }))
}
