// Resume drafting: LLM-written LaTeX sections assembled into a full document
// and handed to the external compile service as a URL.
// All LLM calls go through llm_client.

pub mod drafter;
pub mod generator;
pub mod handlers;
pub mod latex;
pub mod models;
pub mod prompts;
