//! Response Acquisition Controller — the one place that decides what the user
//! sees when the model is slow, broken, over quota, or just wrong.
//!
//! Flow per call: build_prompt → CompletionService::complete → parse →
//!   Ok  → live result
//!   Err → canned result, flagged degraded with the cause.
//!
//! Neither `acquire_roast` nor `acquire_plan` can fail.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{CompletionService, LlmError};
use crate::models::results::RoastPayload;
use crate::models::{IdeaText, PlanResult, RoastResult};
use crate::roast::fallback::{fallback_plan, FallbackPool};
use crate::roast::parser::{parse_roast, RoastParseError};
use crate::roast::prompts::{build_prompt, TaskKind};

/// Why a live result could not be used.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error(transparent)]
    Transport(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] RoastParseError),
}

#[derive(Clone)]
pub struct AcquisitionController {
    completion: Arc<dyn CompletionService>,
    fallback: FallbackPool,
}

impl AcquisitionController {
    pub fn new(completion: Arc<dyn CompletionService>, fallback: FallbackPool) -> Self {
        Self {
            completion,
            fallback,
        }
    }

    pub fn fallback_pool(&self) -> &FallbackPool {
        &self.fallback
    }

    /// Produces a roast for `idea`, live if possible, canned otherwise.
    pub async fn acquire_roast(&self, idea: &IdeaText) -> RoastResult {
        match self.fetch_roast(idea).await {
            Ok(payload) => {
                info!("Roast acquired live (score {}/100)", payload.score);
                RoastResult::live(payload)
            }
            Err(failure) => {
                warn!("Roast acquisition failed, using fallback pool: {failure}");
                RoastResult::degraded(self.fallback.pick(), degraded_reason(&failure))
            }
        }
    }

    /// Produces an execution plan for `idea`, live if possible, canned otherwise.
    pub async fn acquire_plan(&self, idea: &IdeaText) -> PlanResult {
        let prompt = build_prompt(idea, TaskKind::Plan);
        match self
            .completion
            .complete(&prompt, TaskKind::Plan.structured())
            .await
        {
            Ok(plan_text) => {
                info!("Plan acquired live ({} chars)", plan_text.len());
                PlanResult {
                    plan_text,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!("Plan acquisition failed, using canned plan: {e}");
                PlanResult {
                    plan_text: fallback_plan(&e.to_string()),
                    degraded: true,
                }
            }
        }
    }

    async fn fetch_roast(&self, idea: &IdeaText) -> Result<RoastPayload, UpstreamFailure> {
        let prompt = build_prompt(idea, TaskKind::Critique);
        let raw = self
            .completion
            .complete(&prompt, TaskKind::Critique.structured())
            .await?;
        Ok(parse_roast(&raw)?)
    }
}

/// Notice text shown above a degraded roast.
fn degraded_reason(failure: &UpstreamFailure) -> String {
    match failure {
        UpstreamFailure::Transport(e) => {
            format!("API quota/error (showing a canned roast): {e}")
        }
        UpstreamFailure::Parse(e) => {
            format!("The model returned an unusable answer (showing a canned roast): {e}")
        }
    }
}
