//! Session state machine.
//!
//! ```text
//! Idle ──submit──▶ Acquiring ──▶ Ready | ReadyDegraded
//! Ready* ──plan──▶ Acquiring ──▶ PlanReady | PlanReadyDegraded
//! any ──submit──▶ Acquiring (plan discarded)
//! ```
//!
//! `Acquiring` is never stored: it is what observers see while the session's
//! mutex is held by an acquisition (see `SessionStore::snapshot`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{IdeaText, PlanResult, RoastResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Acquiring,
    Ready,
    ReadyDegraded,
    PlanReady,
    PlanReadyDegraded,
}

#[derive(Debug)]
pub struct Session {
    idea: Option<IdeaText>,
    roast: Option<RoastResult>,
    plan: Option<PlanResult>,
    last_active: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            idea: None,
            roast: None,
            plan: None,
            last_active: Utc::now(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.roast, &self.plan) {
            (None, _) => SessionPhase::Idle,
            (Some(_), Some(plan)) if plan.degraded => SessionPhase::PlanReadyDegraded,
            (Some(_), Some(_)) => SessionPhase::PlanReady,
            (Some(roast), None) if roast.degraded => SessionPhase::ReadyDegraded,
            (Some(_), None) => SessionPhase::Ready,
        }
    }

    /// Starts a new idea: everything derived from the previous one is dropped.
    pub fn begin_idea(&mut self, idea: IdeaText) {
        self.idea = Some(idea);
        self.roast = None;
        self.plan = None;
        self.touch();
    }

    pub fn complete_roast(&mut self, roast: RoastResult) {
        self.roast = Some(roast);
        self.touch();
    }

    /// The idea a plan should be acquired for. Requires a finished roast.
    pub fn plan_target(&self) -> Result<IdeaText, AppError> {
        match (&self.idea, &self.roast) {
            (Some(idea), Some(_)) => Ok(idea.clone()),
            _ => Err(AppError::Conflict(
                "Roast an idea before asking for an execution plan.".to_string(),
            )),
        }
    }

    pub fn complete_plan(&mut self, plan: PlanResult) {
        self.plan = Some(plan);
        self.touch();
    }

    pub fn idea(&self) -> Option<&IdeaText> {
        self.idea.as_ref()
    }

    pub fn roast(&self) -> Option<&RoastResult> {
        self.roast.as_ref()
    }

    pub fn plan(&self) -> Option<&PlanResult> {
        self.plan.as_ref()
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roast(degraded: bool) -> RoastResult {
        RoastResult {
            roast: "r".to_string(),
            score: 10,
            action: "a".to_string(),
            degraded,
            degraded_reason: degraded.then(|| "quota".to_string()),
        }
    }

    fn plan(degraded: bool) -> PlanResult {
        PlanResult {
            plan_text: "1. Do it".to_string(),
            degraded,
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.plan_target().is_err());
    }

    #[test]
    fn test_phases_follow_results() {
        let mut session = Session::new();
        session.begin_idea(IdeaText::parse("A").unwrap());
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.complete_roast(roast(true));
        assert_eq!(session.phase(), SessionPhase::ReadyDegraded);

        session.complete_plan(plan(false));
        assert_eq!(session.phase(), SessionPhase::PlanReady);
    }

    #[test]
    fn test_new_idea_discards_roast_and_plan() {
        let mut session = Session::new();
        session.begin_idea(IdeaText::parse("A").unwrap());
        session.complete_roast(roast(false));
        session.complete_plan(plan(true));
        assert_eq!(session.phase(), SessionPhase::PlanReadyDegraded);

        session.begin_idea(IdeaText::parse("B").unwrap());
        assert!(session.roast().is_none());
        assert!(session.plan().is_none());
        assert_eq!(session.idea().unwrap().as_str(), "B");
        assert!(matches!(session.plan_target(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_phase_serializes_snake_case() {
        let json = serde_json::to_string(&SessionPhase::PlanReadyDegraded).unwrap();
        assert_eq!(json, "\"plan_ready_degraded\"");
    }
}
