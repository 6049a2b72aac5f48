//! Prompt Formatter — turns an idea into the text sent to the model.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::models::IdeaText;

/// What we are asking the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Short critique returned as a three-field JSON record.
    Critique,
    /// Long-form execution plan returned as prose.
    Plan,
}

impl TaskKind {
    /// Whether the completion should be requested as structured JSON.
    pub fn structured(self) -> bool {
        matches!(self, TaskKind::Critique)
    }
}

/// Critique prompt template. Replace `{idea}` and `{format_instruction}` before sending.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"You are a brutal VC investor. Analyze this SaaS idea:
"{idea}"

Respond with exactly three keys:
"roast" (a 2-sentence harsh critique),
"score" (an integer 0-100),
"action" (one specific next step, a single sentence).

{format_instruction}"#;

/// Plan prompt template. Replace `{idea}` and `{format_instruction}` before sending.
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Write a detailed 5-step execution plan for this SaaS idea:
"{idea}"

Be specific, actionable, and ruthless.
{format_instruction}"#;

/// Builds the prompt for `kind`, embedding the idea verbatim.
pub fn build_prompt(idea: &IdeaText, kind: TaskKind) -> String {
    let (template, format_instruction) = match kind {
        TaskKind::Critique => (CRITIQUE_PROMPT_TEMPLATE, JSON_ONLY_INSTRUCTION),
        TaskKind::Plan => (PLAN_PROMPT_TEMPLATE, PLAIN_TEXT_INSTRUCTION),
    };
    // Instruction first so an idea containing the literal placeholder is left alone.
    template
        .replace("{format_instruction}", format_instruction)
        .replace("{idea}", idea.as_str())
}
