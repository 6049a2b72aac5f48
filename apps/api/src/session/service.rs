//! Submission gate and session transitions.
//!
//! Checks run in the order the user would hit them: empty idea first, then
//! missing credential. Only after both pass does the session change and the
//! controller get called.

use tracing::info;

use crate::errors::AppError;
use crate::models::{IdeaText, PlanResult, RoastResult};
use crate::roast::AcquisitionController;
use crate::session::state::Session;

#[derive(Clone)]
pub struct SessionService {
    controller: AcquisitionController,
    api_configured: bool,
}

impl SessionService {
    pub fn new(controller: AcquisitionController, api_configured: bool) -> Self {
        Self {
            controller,
            api_configured,
        }
    }

    pub fn api_configured(&self) -> bool {
        self.api_configured
    }

    /// Validates `raw_idea`, resets the session to it, and acquires a roast.
    pub async fn submit_idea(
        &self,
        session: &mut Session,
        raw_idea: &str,
    ) -> Result<RoastResult, AppError> {
        let idea = IdeaText::parse(raw_idea)?;
        self.ensure_configured()?;

        info!("Roasting new idea ({} chars)", idea.as_str().len());
        session.begin_idea(idea.clone());
        let roast = self.controller.acquire_roast(&idea).await;
        session.complete_roast(roast.clone());
        Ok(roast)
    }

    /// Returns the plan for the current idea, acquiring it on first request.
    pub async fn request_plan(&self, session: &mut Session) -> Result<PlanResult, AppError> {
        if let Some(plan) = session.plan() {
            return Ok(plan.clone());
        }
        let idea = session.plan_target()?;
        self.ensure_configured()?;

        info!("Drafting execution plan");
        let plan = self.controller.acquire_plan(&idea).await;
        session.complete_plan(plan.clone());
        Ok(plan)
    }

    fn ensure_configured(&self) -> Result<(), AppError> {
        if self.api_configured {
            Ok(())
        } else {
            Err(AppError::Configuration(
                "Please configure GEMINI_API_KEY in the .env file first.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::roast::FallbackPool;
    use crate::session::state::SessionPhase;

    const LIVE_ROAST: &str = r#"{"roast": "Meh.", "score": 40, "action": "Ship it."}"#;

    /// Structured calls get a roast, prose calls echo which idea they were for.
    fn echoing_double() -> Arc<ScriptedCompletion> {
        Arc::new(ScriptedCompletion::new(|prompt, structured| {
            if structured {
                Ok(LIVE_ROAST.to_string())
            } else if prompt.contains("\"idea B\"") {
                Ok("1. Plan for B".to_string())
            } else {
                Ok("1. Plan for A".to_string())
            }
        }))
    }

    fn service(double: Arc<ScriptedCompletion>, configured: bool) -> SessionService {
        SessionService::new(
            AcquisitionController::new(double, FallbackPool::builtin()),
            configured,
        )
    }

    #[tokio::test]
    async fn test_whitespace_idea_never_reaches_upstream() {
        let double = echoing_double();
        let svc = service(double.clone(), true);
        let mut session = Session::new();

        for raw in ["", "   ", "\n\t"] {
            let err = svc.submit_idea(&mut session, raw).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(double.calls(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_submission() {
        let double = echoing_double();
        let svc = service(double.clone(), false);
        let mut session = Session::new();

        let err = svc
            .submit_idea(&mut session, "sell shovels")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
        assert_eq!(double.calls(), 0);
        assert!(session.idea().is_none());
    }

    #[tokio::test]
    async fn test_empty_idea_reported_before_missing_credential() {
        let svc = service(echoing_double(), false);
        let err = svc.submit_idea(&mut Session::new(), "  ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_stores_trimmed_idea_and_roast() {
        let svc = service(echoing_double(), true);
        let mut session = Session::new();

        let roast = svc.submit_idea(&mut session, "  idea A  ").await.unwrap();

        assert_eq!(roast.score, 40);
        assert_eq!(session.idea().unwrap().as_str(), "idea A");
        assert_eq!(session.roast(), Some(&roast));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[tokio::test]
    async fn test_plan_before_roast_is_conflict() {
        let double = echoing_double();
        let svc = service(double.clone(), true);
        let err = svc.request_plan(&mut Session::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(double.calls(), 0);
    }

    #[tokio::test]
    async fn test_plan_is_cached_per_idea() {
        let double = echoing_double();
        let svc = service(double.clone(), true);
        let mut session = Session::new();

        svc.submit_idea(&mut session, "idea A").await.unwrap();
        let first = svc.request_plan(&mut session).await.unwrap();
        let second = svc.request_plan(&mut session).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(double.calls(), 2, "one roast call + one plan call");
        assert_eq!(session.phase(), SessionPhase::PlanReady);
    }

    #[tokio::test]
    async fn test_new_idea_resets_plan_before_next_plan_call() {
        let double = echoing_double();
        let svc = service(double.clone(), true);
        let mut session = Session::new();

        svc.submit_idea(&mut session, "idea A").await.unwrap();
        let plan_a = svc.request_plan(&mut session).await.unwrap();
        assert_eq!(plan_a.plan_text, "1. Plan for A");

        svc.submit_idea(&mut session, "idea B").await.unwrap();
        assert!(session.plan().is_none(), "plan must reset on new idea");
        assert_eq!(session.phase(), SessionPhase::Ready);
        let plan_calls_so_far = double.prompts().iter().filter(|(_, s)| !s).count();
        assert_eq!(plan_calls_so_far, 1);

        let plan_b = svc.request_plan(&mut session).await.unwrap();
        assert_eq!(plan_b.plan_text, "1. Plan for B");

        let prompts = double.prompts();
        let last = prompts.last().unwrap();
        assert!(!last.1);
        assert!(last.0.contains("\"idea B\""));
    }

    #[tokio::test]
    async fn test_degraded_roast_still_allows_plan() {
        let double = Arc::new(ScriptedCompletion::failing());
        let svc = service(double.clone(), true);
        let mut session = Session::new();

        let roast = svc.submit_idea(&mut session, "idea A").await.unwrap();
        assert!(roast.degraded);
        assert_eq!(session.phase(), SessionPhase::ReadyDegraded);

        let plan = svc.request_plan(&mut session).await.unwrap();
        assert!(plan.degraded);
        assert_eq!(session.phase(), SessionPhase::PlanReadyDegraded);
    }
}
