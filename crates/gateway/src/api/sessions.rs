//! Session inspection endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use ipp_sessions::SessionPhase;

use crate::state::AppState;

/// One row of `GET /sessions`.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub role: String,
    pub experience_level: String,
    pub question_count: u32,
    pub max_questions: u32,
    pub phase: SessionPhase,
    pub updated_at: String,
}

/// GET /sessions, newest first.
pub async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    let sessions: Vec<SessionSummary> = state
        .interviewer
        .store()
        .list()
        .into_iter()
        .map(|s| SessionSummary {
            session_id: s.id,
            role: s.role,
            experience_level: s.experience_level,
            question_count: s.question_count,
            max_questions: s.max_questions,
            phase: s.phase,
            updated_at: s.updated_at.to_rfc3339(),
        })
        .collect();

    Json(serde_json::json!({
        "count": sessions.len(),
        "sessions": sessions,
    }))
}

/// GET /sessions/:id: full snapshot including the transcript.
pub async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.interviewer.snapshot(&id) {
        Ok(session) => Json(session).into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /sessions/:id
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.interviewer.remove(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
