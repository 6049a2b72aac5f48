mod config;
mod errors;
mod export;
mod extract;
mod llm_client;
mod models;
mod roast;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::default_exporter;
use crate::llm_client::LlmClient;
use crate::roast::{AcquisitionController, FallbackPool};
use crate::routes::build_router;
use crate::session::{SessionService, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Idea Roaster API v{}", env!("CARGO_PKG_VERSION"));

    // Fallback pool: built-in canned roasts unless a file overrides them
    let fallback = match &config.fallback_pool_path {
        Some(path) => FallbackPool::from_file(path)?,
        None => FallbackPool::builtin(),
    };

    // Initialize LLM client. Without a key it is never called: the gate refuses first.
    if !config.api_configured() {
        warn!("GEMINI_API_KEY is not set; submissions are disabled until it is configured");
    }
    let llm = LlmClient::new(config.gemini_api_key.clone().unwrap_or_default());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let controller = AcquisitionController::new(Arc::new(llm), fallback);
    info!(
        "Fallback pool loaded ({} canned roasts)",
        controller.fallback_pool().entries().len()
    );
    let service = SessionService::new(controller, config.api_configured());

    let exporter = default_exporter();
    info!("PDF export available: {}", exporter.is_available());

    let sessions = SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes));

    // Build app state
    let state = AppState {
        sessions,
        service,
        exporter,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
