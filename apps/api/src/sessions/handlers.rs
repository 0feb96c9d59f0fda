//! Axum route handlers for scoring sessions.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::session::ScoringSession;
use crate::engine::suggestion::{AnalysisResult, Suggestion};
use crate::errors::AppError;
use crate::sessions::store::session_update;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedSuggestionsResponse {
    pub session_id: Uuid,
    pub applied_count: usize,
    pub suggestions: Vec<Suggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Opens a session for an already-scored analysis result.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(result): Json<AnalysisResult>,
) -> Result<Json<ScoringSession>, AppError> {
    let session = ScoringSession::new(result);
    state.sessions.put(session.clone()).await?;

    info!(session_id = %session.id, points = session.point_values.len(), "scoring session opened");
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ScoringSession>, AppError> {
    Ok(Json(load_session(&state, session_id).await?))
}

/// PUT /api/v1/sessions/:id/result
///
/// Swaps in a new analysis result. Point values are recomputed and every
/// toggle is cleared in the same write.
pub async fn handle_replace_result(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(result): Json<AnalysisResult>,
) -> Result<Json<ScoringSession>, AppError> {
    let session = state
        .sessions
        .update(session_id, session_update(move |s| Ok(s.replace_result(result))))
        .await?;

    info!(session_id = %session.id, "analysis result replaced");
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/toggle
///
/// The index is checked against the result stored at write time.
pub async fn handle_toggle(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ScoringSession>, AppError> {
    let index = request.index;
    let session = state
        .sessions
        .update(
            session_id,
            session_update(move |s| {
                let count = s.result.suggestions.len();
                if index >= count {
                    return Err(AppError::Validation(format!(
                        "suggestion index {index} out of range (session has {count} suggestions)"
                    )));
                }
                Ok(s.toggle(index))
            }),
        )
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ScoringSession>, AppError> {
    let session = state
        .sessions
        .update(session_id, session_update(|s| Ok(s.reset())))
        .await?;
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id/selected
///
/// Suggestions to hand to the resume optimizer: applied actionable ones plus
/// every informational one.
pub async fn handle_selected_suggestions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SelectedSuggestionsResponse>, AppError> {
    let session = load_session(&state, session_id).await?;
    Ok(Json(SelectedSuggestionsResponse {
        session_id: session.id,
        applied_count: session.applied.len(),
        suggestions: session.selected_suggestions().into_iter().cloned().collect(),
    }))
}

async fn load_session(state: &AppState, session_id: Uuid) -> Result<ScoringSession, AppError> {
    state
        .sessions
        .get(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}
