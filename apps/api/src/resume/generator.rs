//! Resume generation pipeline.
//!
//! Flow: draft sections → assemble document for the layout → compile URL.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::drafter::SectionDrafter;
use crate::resume::latex::{assemble_document, compile_url};
use crate::resume::models::ResumeGenRequest;

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub latex: String,
    pub pdf_url: String,
}

pub async fn generate_resume(
    drafter: &dyn SectionDrafter,
    compile_base_url: &str,
    request: &ResumeGenRequest,
) -> Result<GeneratedResume, AppError> {
    if request.candidate.name.trim().is_empty() {
        return Err(AppError::Validation(
            "candidate.name cannot be empty".to_string(),
        ));
    }

    let sections = drafter
        .draft(
            &request.candidate,
            &request.job_description,
            request.layout,
        )
        .await?;

    let latex = assemble_document(
        &request.candidate,
        &request.links,
        &sections,
        request.layout,
    );
    let pdf_url = compile_url(compile_base_url, &latex)?.to_string();

    info!(
        "Generated {:?} resume for '{}' ({} bytes of LaTeX)",
        request.layout,
        request.candidate.name,
        latex.len()
    );

    Ok(GeneratedResume { latex, pdf_url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::resume::models::{Candidate, JobDescription, ResumeLayout, ResumeSections};

    struct FixedDrafter;

    #[async_trait]
    impl SectionDrafter for FixedDrafter {
        async fn draft(
            &self,
            _candidate: &Candidate,
            _job: &JobDescription,
            _layout: ResumeLayout,
        ) -> Result<ResumeSections, AppError> {
            Ok(ResumeSections {
                education: "\\section*{Education} 2018\u{2013}2022".to_string(),
                skills: "\\section*{Skills}".to_string(),
                ..ResumeSections::default()
            })
        }
    }

    struct FailingDrafter;

    #[async_trait]
    impl SectionDrafter for FailingDrafter {
        async fn draft(
            &self,
            _candidate: &Candidate,
            _job: &JobDescription,
            _layout: ResumeLayout,
        ) -> Result<ResumeSections, AppError> {
            Err(AppError::Llm("model unavailable".to_string()))
        }
    }

    fn request(name: &str) -> ResumeGenRequest {
        serde_json::from_value(serde_json::json!({
            "links": {"GitHub": "https://github.com/jdoe"},
            "candidate": {
                "name": name,
                "email": "jane@example.com",
                "phone": "123",
                "linkedin": "",
                "github": "",
                "education": [],
                "skills": [],
                "projects": [],
                "experience": []
            },
            "job_description": {"title": "Engineer", "company": "Acme", "requirements": []}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_resume_builds_compile_url() {
        let generated = generate_resume(&FixedDrafter, "https://latexonline.cc/compile", &request("Jane Doe"))
            .await
            .unwrap();

        assert!(generated.latex.contains("2018-2022"));
        assert!(generated.latex.contains(r"\href{https://github.com/jdoe}{GitHub}"));
        assert!(generated
            .pdf_url
            .starts_with("https://latexonline.cc/compile?text="));
    }

    #[tokio::test]
    async fn test_generate_resume_rejects_blank_name() {
        let err = generate_resume(&FixedDrafter, "https://latexonline.cc/compile", &request("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_resume_propagates_drafter_error() {
        let err = generate_resume(&FailingDrafter, "https://latexonline.cc/compile", &request("Jane"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_generate_resume_bad_compile_url_is_internal() {
        let err = generate_resume(&FixedDrafter, "::bad::", &request("Jane"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
