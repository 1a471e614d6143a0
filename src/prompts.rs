//! Prompts for the narration-generation call.
//!
//! Centralising the prompt text here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking the narration style or the length
//!    instruction requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the exact strings sent to the
//!    generation model without spinning up a real API call.
//!
//! The length instruction is interpolated from the script budget so the
//! prompt can never drift from what the pipeline actually enforces.

use crate::pipeline::truncate::MAX_SCRIPT_CHARS;

/// System prompt template for rewriting an academic paper as a podcast
/// script. `{max_chars}` is replaced with the script budget.
const SYSTEM_PROMPT_TEMPLATE: &str = "You are an expert at converting academic papers into engaging, \
podcast-style narratives. Keep the technical accuracy but make it more conversational and easier \
to follow. IMPORTANT: Your response MUST be under {max_chars} characters. Focus on the key \
findings and main ideas only.";

/// Build the system prompt with the script budget filled in.
pub fn narration_system_prompt() -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{max_chars}", &MAX_SCRIPT_CHARS.to_string())
}

/// Build the user message carrying the truncated paper text.
pub fn narration_user_message(paper_text: &str) -> String {
    format!(
        "Convert this academic paper into a concise podcast script: {}",
        paper_text
    )
}
