//! Canned results used when the model is unavailable or returns garbage.
//!
//! The roast pool is small and fixed for the life of the process; the pick is
//! uniform. The plan fallback is a single text.

use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use thiserror::Error;

use crate::models::results::RoastPayload;
use crate::roast::parser::MAX_SCORE;

/// A pool smaller than this would make the "random" pick a constant.
pub const MIN_POOL_SIZE: usize = 2;

#[derive(Debug, Error)]
pub enum FallbackPoolError {
    #[error("fallback pool needs at least {min} entries, got {0}", min = MIN_POOL_SIZE)]
    TooSmall(usize),

    #[error("fallback entry {index} has score {score}, expected 0-100")]
    ScoreOutOfRange { index: usize, score: u8 },
}

/// Pre-authored roasts to fall back on. Always holds at least `MIN_POOL_SIZE` entries.
#[derive(Debug, Clone)]
pub struct FallbackPool {
    entries: Vec<RoastPayload>,
}

impl FallbackPool {
    pub fn new(entries: Vec<RoastPayload>) -> Result<Self, FallbackPoolError> {
        if entries.len() < MIN_POOL_SIZE {
            return Err(FallbackPoolError::TooSmall(entries.len()));
        }
        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, e)| i64::from(e.score) > MAX_SCORE)
        {
            return Err(FallbackPoolError::ScoreOutOfRange {
                index,
                score: entry.score,
            });
        }
        Ok(Self { entries })
    }

    /// The two roasts that ship with the binary.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                RoastPayload {
                    roast: "This idea is so derivative it makes a photocopier look original. \
                            You're building a feature, not a product."
                        .to_string(),
                    score: 15,
                    action: "Pivot to something that solves a real problem for people with money."
                        .to_string(),
                },
                RoastPayload {
                    roast: "The only thing 'revolutionary' about this is how quickly you'll burn \
                            through your savings. No one needs this."
                        .to_string(),
                    score: 5,
                    action: "Don't quit your day job. Seriously.".to_string(),
                },
            ],
        }
    }

    /// Loads a pool from a JSON array of `{roast, score, action}` objects.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fallback pool {}", path.display()))?;
        let entries: Vec<RoastPayload> = serde_json::from_str(&raw)
            .with_context(|| format!("Fallback pool {} is not valid JSON", path.display()))?;
        Ok(Self::new(entries)?)
    }

    /// Uniform random pick.
    pub fn pick(&self) -> RoastPayload {
        let index = rand::thread_rng().gen_range(0..self.entries.len());
        self.entries[index].clone()
    }

    pub fn entries(&self) -> &[RoastPayload] {
        &self.entries
    }
}

impl Default for FallbackPool {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Canned plan shown when the model cannot produce one.
pub const CANNED_PLAN: &str = "\
Execution Plan (API unavailable, canned answer):

1. Validation: Go to Reddit r/SaaS and ask if anyone would pay for this. (Spoiler: no.)
2. MVP: Build a landing page in one hour with a no-code site builder. Do not write code.
3. Outreach: Cold email 50 potential users. If nobody replies, kill the idea.
4. Pivot: Realize the market is too small. Switch to selling shovels to other AI startups.
5. Scale: If by some miracle you get users, automate the backend.";

/// The canned plan with a note naming why it was used.
pub fn fallback_plan(cause: &str) -> String {
    format!("{CANNED_PLAN}\n\n(System note: generated from the canned plan due to API error: {cause})")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn entry(score: u8) -> RoastPayload {
        RoastPayload {
            roast: format!("roast {score}"),
            score,
            action: "act".to_string(),
        }
    }

    #[test]
    fn test_builtin_pool_meets_minimum() {
        let pool = FallbackPool::builtin();
        assert!(pool.entries().len() >= MIN_POOL_SIZE);
        assert!(pool.entries().iter().all(|e| e.score <= 100));
    }

    #[test]
    fn test_pick_is_always_a_member() {
        let pool = FallbackPool::builtin();
        for _ in 0..50 {
            assert!(pool.entries().contains(&pool.pick()));
        }
    }

    #[test]
    fn test_pick_reaches_every_entry() {
        let pool = FallbackPool::builtin();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pool.pick().score);
        }
        assert_eq!(seen.len(), pool.entries().len());
    }

    #[test]
    fn test_single_entry_pool_is_rejected() {
        assert!(matches!(
            FallbackPool::new(vec![entry(10)]),
            Err(FallbackPoolError::TooSmall(1))
        ));
    }

    #[test]
    fn test_out_of_range_entry_is_rejected() {
        assert!(matches!(
            FallbackPool::new(vec![entry(10), entry(120)]),
            Err(FallbackPoolError::ScoreOutOfRange { index: 1, score: 120 })
        ));
    }

    #[test]
    fn test_pool_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"roast": "Too niche.", "score": 20, "action": "Widen the market."}},
                {{"roast": "Too broad.", "score": 30, "action": "Pick one customer."}},
                {{"roast": "Too late.", "score": 1, "action": "Find a new idea."}}
            ]"#
        )
        .unwrap();

        let pool = FallbackPool::from_file(file.path()).unwrap();
        assert_eq!(pool.entries().len(), 3);
        assert_eq!(pool.entries()[2].roast, "Too late.");
    }

    #[test]
    fn test_pool_file_with_one_entry_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"roast": "r", "score": 1, "action": "a"}}]"#).unwrap();
        assert!(FallbackPool::from_file(file.path()).is_err());
    }

    #[test]
    fn test_fallback_plan_names_cause() {
        let plan = fallback_plan("quota exceeded");
        assert!(plan.starts_with(CANNED_PLAN));
        assert!(plan.ends_with("quota exceeded)"));
    }
}
