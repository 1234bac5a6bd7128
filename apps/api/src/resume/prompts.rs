// LLM prompt constants for resume drafting.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for section drafting.
pub const RESUME_SYSTEM: &str = "You are a resume generator that writes LaTeX. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Section drafting prompt. Replace `{candidate_json}`, `{job_json}`,
/// `{layout_instruction}` and `{ascii_instruction}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Input:
Candidate:
{candidate_json}
Job:
{job_json}

Task:
Return a valid JSON object with keys: "education", "skills", "experience", "projects", "additional".
Each value = one LaTeX string.

RULES:
1. {ascii_instruction}
2. Escape backslashes for JSON.
3. No preamble (\documentclass, \begin{document}, \end{document}).
4. No % comments.
5. Format:
   - Education: \section*{Education} \begin{itemize} ... \end{itemize}
   - Skills: one bullet per category:
     \section*{Skills}
     \begin{itemize}
       \item \textbf{Languages}: ...
       \item \textbf{Frameworks}: ...
     \end{itemize}
   - Experience/Projects: \section*{...} \textbf{Role, Org} \hfill Date \begin{itemize} ... \end{itemize}
   - Additional: same style, or "" if empty.
6. Strict JSON: double quotes, no trailing commas.
7. Generate content optimized for a {layout_instruction}.
   Tailor wording toward the job's requirements, but never invent experience."#;

pub const HORIZONTAL_LAYOUT_INSTRUCTION: &str = "horizontal two-column layout with contact info in one line at top. \
    Keep sections concise and compact and use shorter bullet points";

pub const VERTICAL_LAYOUT_INSTRUCTION: &str = "vertical single-column layout with contact info stacked vertically. \
    Descriptions may be more detailed";
