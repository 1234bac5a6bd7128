//! Section drafting: turns a candidate profile into LaTeX section bodies.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::ASCII_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::resume::models::{Candidate, JobDescription, ResumeLayout, ResumeSections};
use crate::resume::prompts::{
    HORIZONTAL_LAYOUT_INSTRUCTION, RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM,
    VERTICAL_LAYOUT_INSTRUCTION,
};

#[async_trait]
pub trait SectionDrafter: Send + Sync {
    async fn draft(
        &self,
        candidate: &Candidate,
        job: &JobDescription,
        layout: ResumeLayout,
    ) -> Result<ResumeSections, AppError>;
}

/// Drafts sections with a single LLM call.
pub struct LlmSectionDrafter {
    llm: LlmClient,
}

impl LlmSectionDrafter {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SectionDrafter for LlmSectionDrafter {
    async fn draft(
        &self,
        candidate: &Candidate,
        job: &JobDescription,
        layout: ResumeLayout,
    ) -> Result<ResumeSections, AppError> {
        let prompt = build_prompt(candidate, job, layout)?;
        info!(
            "Drafting {:?} resume sections for '{}' at {}",
            layout, job.title, job.company
        );

        let reply: Value = self
            .llm
            .call_json(&prompt, RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume drafting failed: {e}")))?;

        ResumeSections::from_json(&reply).ok_or_else(|| {
            AppError::Llm("Resume drafting returned JSON that is not an object".to_string())
        })
    }
}

/// Fills the drafting template with the candidate's sections and the job.
fn build_prompt(
    candidate: &Candidate,
    job: &JobDescription,
    layout: ResumeLayout,
) -> Result<String, AppError> {
    let candidate_json = serde_json::to_string_pretty(&serde_json::json!({
        "education": candidate.education,
        "skills": candidate.skills,
        "projects": candidate.projects,
        "experience": candidate.experience,
        "additional": candidate.additional.clone().unwrap_or_default(),
    }))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize candidate: {e}")))?;

    let job_json = serde_json::to_string_pretty(job)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job: {e}")))?;

    let layout_instruction = match layout {
        ResumeLayout::Horizontal => HORIZONTAL_LAYOUT_INSTRUCTION,
        ResumeLayout::Vertical => VERTICAL_LAYOUT_INSTRUCTION,
    };

    Ok(RESUME_PROMPT_TEMPLATE
        .replace("{ascii_instruction}", ASCII_ONLY_INSTRUCTION)
        .replace("{layout_instruction}", layout_instruction)
        .replace("{job_json}", &job_json)
        .replace("{candidate_json}", &candidate_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::ExperienceItem;

    fn candidate() -> Candidate {
        Candidate {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "123".to_string(),
            linkedin: String::new(),
            github: String::new(),
            education: vec![],
            skills: vec!["Rust".to_string(), "Tokio".to_string()],
            projects: vec![],
            experience: vec![ExperienceItem {
                role: "SDE".to_string(),
                company: "IBM".to_string(),
                duration: "2022-2024".to_string(),
                work: vec!["Built services".to_string()],
            }],
            additional: None,
        }
    }

    fn job() -> JobDescription {
        JobDescription {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: Some("Pune".to_string()),
            requirements: vec!["Rust".to_string()],
        }
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let prompt = build_prompt(&candidate(), &job(), ResumeLayout::Vertical).unwrap();
        for placeholder in [
            "{candidate_json}",
            "{job_json}",
            "{layout_instruction}",
            "{ascii_instruction}",
        ] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
        assert!(prompt.contains("\"Tokio\""));
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("vertical single-column"));
    }

    #[test]
    fn test_prompt_uses_layout_instruction() {
        let prompt = build_prompt(&candidate(), &job(), ResumeLayout::Horizontal).unwrap();
        assert!(prompt.contains("horizontal two-column"));
        assert!(!prompt.contains("vertical single-column"));
    }

    #[test]
    fn test_prompt_serializes_missing_additional_as_empty_list() {
        let prompt = build_prompt(&candidate(), &job(), ResumeLayout::Vertical).unwrap();
        assert!(prompt.contains("\"additional\": []"));
    }
}
