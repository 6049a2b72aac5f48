use std::fmt;

use serde::Serialize;

use crate::errors::AppError;

/// A trimmed, non-empty idea as submitted by the user.
///
/// The only way to build one is `IdeaText::parse`, so anything holding an
/// `IdeaText` has already passed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdeaText(String);

impl IdeaText {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "Please enter an idea first. We can't roast thin air.".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdeaText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let idea = IdeaText::parse("  Uber for dog walkers \n").unwrap();
        assert_eq!(idea.as_str(), "Uber for dog walkers");
    }

    #[test]
    fn test_parse_rejects_whitespace_only() {
        for raw in ["", "   ", "\n\t  \r\n"] {
            assert!(matches!(IdeaText::parse(raw), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let idea = IdeaText::parse("sell shovels").unwrap();
        assert_eq!(serde_json::to_string(&idea).unwrap(), "\"sell shovels\"");
    }
}
