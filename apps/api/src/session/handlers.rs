//! Axum route handlers for the session API.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::text::{attachment, PLAN_FILE_NAME, REPORT_FILE_NAME};
use crate::export::ReportDocument;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{PlanResult, RoastResult};
use crate::session::state::{Session, SessionPhase};
use crate::session::store::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub phase: SessionPhase,
}

#[derive(Debug, Deserialize)]
pub struct SubmitIdeaRequest {
    pub idea: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            phase: SessionPhase::Idle,
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.snapshot(session_id).await?))
}

/// POST /api/v1/sessions/:id/roast
///
/// Replaces the session's idea and acquires a roast for it. Always answers
/// with a usable roast once input and configuration checks pass.
pub async fn handle_submit_idea(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SubmitIdeaRequest>,
) -> Result<Json<RoastResult>, AppError> {
    let shared = state.sessions.get(session_id).await?;
    let service = state.service.clone();

    // Spawned: a dropped connection must not abandon the session mid-acquisition.
    let roast = tokio::spawn(async move {
        let mut session = shared.lock().await;
        service.submit_idea(&mut session, &request.idea).await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Roast task failed: {e}")))??;

    Ok(Json(roast))
}

/// POST /api/v1/sessions/:id/plan
///
/// Returns the cached plan for the current idea, acquiring it on first call.
pub async fn handle_request_plan(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<Json<PlanResult>, AppError> {
    let shared = state.sessions.get(session_id).await?;
    let service = state.service.clone();

    let plan = tokio::spawn(async move {
        let mut session = shared.lock().await;
        service.request_plan(&mut session).await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Plan task failed: {e}")))??;

    Ok(Json(plan))
}

/// GET /api/v1/sessions/:id/plan.txt
pub async fn handle_download_plan(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let shared = state.sessions.get(session_id).await?;
    let plan_text = {
        let session = shared.lock().await;
        session
            .plan()
            .map(|p| p.plan_text.clone())
            .ok_or_else(missing_plan)?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(PLAN_FILE_NAME)),
        ],
        plan_text,
    ))
}

/// GET /api/v1/sessions/:id/report.pdf
pub async fn handle_download_report(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.exporter.is_available() {
        return Err(AppError::ExportUnavailable(
            "PDF export is not available in this build.".to_string(),
        ));
    }

    let shared = state.sessions.get(session_id).await?;
    let report = {
        let session = shared.lock().await;
        report_for(&session)?
    };

    let exporter = state.exporter.clone();
    let pdf = tokio::task::spawn_blocking(move || exporter.export(&report))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    tracing::info!("Exported report for session {session_id} ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment(REPORT_FILE_NAME)),
        ],
        Bytes::from(pdf),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn missing_plan() -> AppError {
    AppError::Conflict("Generate the execution plan before downloading it.".to_string())
}

/// Snapshot of a finished session for the exporter.
fn report_for(session: &Session) -> Result<ReportDocument, AppError> {
    match (session.idea(), session.roast(), session.plan()) {
        (Some(idea), Some(roast), Some(plan)) => Ok(ReportDocument {
            idea: idea.clone(),
            roast: roast.clone(),
            plan: plan.clone(),
            generated_at: Utc::now(),
        }),
        _ => Err(missing_plan()),
    }
}
