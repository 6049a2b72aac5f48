use std::sync::Arc;

use crate::config::Config;
use crate::export::DocumentExporter;
use crate::session::{SessionService, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every live session, keyed by id. In memory only.
    pub sessions: SessionStore,
    pub service: SessionService,
    /// PDF backend, or a stand-in that reports itself unavailable.
    pub exporter: Arc<dyn DocumentExporter>,
    pub config: Config,
}
