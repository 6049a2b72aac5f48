use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// What the page needs to know before rendering its controls.
#[derive(Debug, Serialize)]
pub struct ClientConfig {
    pub api_configured: bool,
    pub donation_url: Option<String>,
    pub pdf_export_available: bool,
}

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/v1/config
pub async fn client_config_handler(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        api_configured: state.service.api_configured(),
        donation_url: state.config.donation_url.clone(),
        pdf_export_available: state.exporter.is_available(),
    })
}
