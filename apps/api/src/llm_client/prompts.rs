// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting output-format rules.

/// Appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return a pure JSON object and nothing else. \
    Do not wrap the JSON in markdown code blocks. \
    Do not add any text before or after the JSON. Output raw JSON only.";

/// Appended to prompts whose answer ends up in a plain-text or PDF download.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Format the answer as a numbered list (1., 2., 3., ...). \
    Do NOT use markdown emphasis: no asterisks, underscores, backticks or '#' headings. \
    Plain sentences only.";
