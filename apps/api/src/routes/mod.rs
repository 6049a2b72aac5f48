pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/config", get(ui::client_config_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route(
            "/api/v1/sessions/:id/roast",
            post(handlers::handle_submit_idea),
        )
        .route(
            "/api/v1/sessions/:id/plan",
            post(handlers::handle_request_plan),
        )
        // Downloads
        .route(
            "/api/v1/sessions/:id/plan.txt",
            get(handlers::handle_download_plan),
        )
        .route(
            "/api/v1/sessions/:id/report.pdf",
            get(handlers::handle_download_report),
        )
        .with_state(state)
}
