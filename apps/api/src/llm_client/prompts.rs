// Shared prompt fragments. Each module that calls the model keeps its own prompts.rs
// alongside it; only cross-cutting pieces live here.

/// Appended to every free-text writing prompt.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with plain text only. Do NOT use markdown, code fences, tables or emoji. \
    Section headings must be written in UPPERCASE on their own line.";
