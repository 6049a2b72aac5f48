use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Longest idle session lifetime accepted from the environment (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Application configuration loaded from environment variables.
///
/// Nothing here is required: a missing `GEMINI_API_KEY` keeps the server up but
/// blocks submissions, a missing `DONATION_URL` hides the support link.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub donation_url: Option<String>,
    pub fallback_pool_path: Option<PathBuf>,
    pub session_ttl_minutes: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            donation_url: optional_env("DONATION_URL"),
            fallback_pool_path: optional_env("FALLBACK_POOL_PATH").map(PathBuf::from),
            session_ttl_minutes: parse_session_ttl(
                &std::env::var("SESSION_TTL_MINUTES").unwrap_or_else(|_| "60".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when a credential is present and submissions may reach the model.
    pub fn api_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Parses `SESSION_TTL_MINUTES`, bounded to 1..=MAX_SESSION_TTL_MINUTES.
fn parse_session_ttl(raw: &str) -> Result<i64> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .context("SESSION_TTL_MINUTES must be a whole number of minutes")?;
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        bail!("SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}");
    }
    Ok(minutes)
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config for unit tests: no env lookups, caller picks the credential.
    pub fn for_tests(gemini_api_key: Option<&str>) -> Self {
        Config {
            gemini_api_key: gemini_api_key.map(str::to_string),
            donation_url: None,
            fallback_pool_path: None,
            session_ttl_minutes: 60,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_configured_tracks_credential() {
        assert!(Config::for_tests(Some("key")).api_configured());
        assert!(!Config::for_tests(None).api_configured());
    }

    #[test]
    fn test_session_ttl_accepts_bounds() {
        assert_eq!(parse_session_ttl("60").unwrap(), 60);
        assert_eq!(parse_session_ttl(" 1 ").unwrap(), 1);
        assert_eq!(
            parse_session_ttl(&MAX_SESSION_TTL_MINUTES.to_string()).unwrap(),
            MAX_SESSION_TTL_MINUTES
        );
    }

    #[test]
    fn test_session_ttl_rejects_out_of_range() {
        for raw in ["0", "-5", "525601", "1000000000000", "9223372036854775807"] {
            let err = parse_session_ttl(raw).unwrap_err();
            assert!(
                err.to_string().contains("between 1 and"),
                "{raw} should be rejected as out of range, got {err}"
            );
        }
        assert!(parse_session_ttl("an hour").is_err());
    }
}
