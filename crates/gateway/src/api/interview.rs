//! Interview flow endpoints: start, chat, feedback.

use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /start_session
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct StartSessionBody {
    pub role: String,
    /// Falls back to `interview.default_experience_level`.
    #[serde(default)]
    pub experience_level: Option<String>,
    /// Text previously returned by `/upload_resume`.
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub initial_message: String,
}

pub async fn start_session(
    State(state): State<AppState>,
    Json(body): Json<StartSessionBody>,
) -> Response {
    let experience = body
        .experience_level
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| state.config.interview.default_experience_level.clone());

    match state
        .interviewer
        .start(&body.role, &experience, body.resume_text)
        .await
    {
        Ok(outcome) => Json(StartSessionResponse {
            session_id: outcome.session_id,
            initial_message: outcome.greeting,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /chat
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub session_id: String,
    pub user_message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub agent_message: String,
    pub is_interview_over: bool,
}

pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatBody>) -> Response {
    match state
        .interviewer
        .advance(&body.session_id, &body.user_message)
        .await
    {
        Ok(turn) => Json(ChatResponse {
            agent_message: turn.message,
            is_interview_over: turn.terminal,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /feedback
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct FeedbackBody {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: SpokenFeedback,
}

#[derive(Debug, Serialize)]
pub struct SpokenFeedback {
    pub spoken_feedback: String,
}

pub async fn feedback(State(state): State<AppState>, Json(body): Json<FeedbackBody>) -> Response {
    match state.interviewer.feedback(&body.session_id).await {
        Ok(text) => Json(FeedbackResponse {
            feedback: SpokenFeedback {
                spoken_feedback: text,
            },
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
