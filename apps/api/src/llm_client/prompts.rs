// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; cross-cutting pieces live here.

/// Keeps model output safe to paste into a LaTeX document.
pub const ASCII_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY ASCII characters. No Unicode characters, no curly quotes, \
    no em dashes, no non-breaking hyphens. Use regular quotes \", regular hyphens -, \
    and basic punctuation only.";
