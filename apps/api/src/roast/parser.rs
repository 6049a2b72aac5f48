//! Parser for the critique record returned by the model.
//!
//! Strips a surrounding code fence, decodes the JSON, then checks each field.
//! Nothing is coerced: a float score, a string score, or a score outside
//! 0–100 is an error.

use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::strip_json_fences;
use crate::models::results::RoastPayload;

pub const MAX_SCORE: i64 = 100;

#[derive(Debug, Error)]
pub enum RoastParseError {
    #[error("malformed roast JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("score {0} is outside 0-100")]
    ScoreOutOfRange(i64),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),
}

/// Wire shape before range checks. `score` is wide so out-of-range values
/// surface as range errors instead of type errors.
#[derive(Debug, Deserialize)]
struct RawRoast {
    roast: String,
    score: i64,
    action: String,
}

/// Parses raw model output into a validated `RoastPayload`.
pub fn parse_roast(raw: &str) -> Result<RoastPayload, RoastParseError> {
    let raw: RawRoast = serde_json::from_str(strip_json_fences(raw))?;
    validate(raw)
}

fn validate(raw: RawRoast) -> Result<RoastPayload, RoastParseError> {
    let score = u8::try_from(raw.score)
        .ok()
        .filter(|s| i64::from(*s) <= MAX_SCORE)
        .ok_or(RoastParseError::ScoreOutOfRange(raw.score))?;

    let roast = raw.roast.trim();
    if roast.is_empty() {
        return Err(RoastParseError::EmptyField("roast"));
    }
    let action = raw.action.trim();
    if action.is_empty() {
        return Err(RoastParseError::EmptyField("action"));
    }

    Ok(RoastPayload {
        roast: roast.to_string(),
        score,
        action: action.to_string(),
    })
}
