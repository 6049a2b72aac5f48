//! In-memory session store. Nothing survives a restart.
//!
//! Each session sits behind its own `tokio::sync::Mutex`; an acquisition holds
//! that lock for its whole duration, so a session never has two in flight.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{IdeaText, PlanResult, RoastResult};
use crate::session::state::{Session, SessionPhase};

pub type SharedSession = Arc<Mutex<Session>>;

/// Point-in-time view of a session for the page.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub idea: Option<IdeaText>,
    pub roast: Option<RoastResult>,
    pub plan: Option<PlanResult>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Registers a fresh idle session, pruning stale ones first.
    pub async fn create(&self) -> Uuid {
        let pruned = self.prune_idle().await;
        if pruned > 0 {
            debug!("Pruned {pruned} idle sessions");
        }

        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())));
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<SharedSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Current state without waiting on an in-flight acquisition.
    pub async fn snapshot(&self, id: Uuid) -> Result<SessionView, AppError> {
        let shared = self.get(id).await?;
        let view = match shared.try_lock() {
            Ok(session) => SessionView {
                session_id: id,
                phase: session.phase(),
                idea: session.idea().cloned(),
                roast: session.roast().cloned(),
                plan: session.plan().cloned(),
            },
            Err(_) => SessionView {
                session_id: id,
                phase: SessionPhase::Acquiring,
                idea: None,
                roast: None,
                plan: None,
            },
        };
        Ok(view)
    }

    /// Drops sessions idle for longer than the TTL. Busy sessions are kept.
    pub async fn prune_idle(&self) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(self.idle_ttl) else {
            return 0;
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, shared| match shared.try_lock() {
            Ok(session) => session.last_active() >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
