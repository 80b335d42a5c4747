pub mod auth;
pub mod health;
pub mod interview;
pub mod media;
pub mod sessions;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::runtime::InterviewError;
use crate::state::AppState;

/// Build the full API router.
///
/// Routes are split into **public** (no auth required) and **protected**
/// (gated behind the bearer-token middleware when a token is configured).
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(health::root));

    let protected = Router::new()
        // Interview flow
        .route("/start_session", post(interview::start_session))
        .route("/chat", post(interview::chat))
        .route("/feedback", post(interview::feedback))
        // Media collaborators
        .route("/upload_resume", post(media::upload_resume))
        .route("/transcribe", post(media::transcribe))
        .route("/speak", post(media::speak))
        // Session inspection
        .route("/sessions", get(sessions::list_sessions))
        .route(
            "/sessions/:id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_api_token,
        ));

    public.merge(protected)
}

/// `{"error": message}` with the given status.
pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for InterviewError {
    fn into_response(self) -> Response {
        let status = match &self {
            InterviewError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            InterviewError::EmptyRole => StatusCode::BAD_REQUEST,
        };
        api_error(status, self.to_string())
    }
}
