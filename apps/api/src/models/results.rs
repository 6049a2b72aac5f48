use serde::{Deserialize, Serialize};

/// The three fields every roast carries, live or canned.
///
/// Deserializing only checks types; `validate` enforces the score range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastPayload {
    pub roast: String,
    pub score: u8, // 0 – 100
    pub action: String,
}

/// What the user sees after submitting an idea.
///
/// Immutable once built; a new idea replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoastResult {
    pub roast: String,
    pub score: u8,
    pub action: String,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl RoastResult {
    pub fn live(payload: RoastPayload) -> Self {
        Self {
            roast: payload.roast,
            score: payload.score,
            action: payload.action,
            degraded: false,
            degraded_reason: None,
        }
    }

    pub fn degraded(payload: RoastPayload, reason: String) -> Self {
        Self {
            roast: payload.roast,
            score: payload.score,
            action: payload.action,
            degraded: true,
            degraded_reason: Some(reason),
        }
    }
}

/// The long-form execution plan, acquired on demand for the current idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    pub plan_text: String,
    pub degraded: bool,
}
