//! Resume upload and voice endpoints. Collaborator failures never become
//! HTTP errors; only malformed requests are rejected.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use super::api_error;
use crate::state::AppState;

/// Pull the `file` part out of a multipart body.
async fn file_part(multipart: &mut Multipart) -> Result<(String, Bytes), Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err(api_error(StatusCode::BAD_REQUEST, "missing multipart field `file`"))
            }
            Err(e) => return Err(api_error(StatusCode::BAD_REQUEST, e.body_text())),
        };
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_owned();
        return match field.bytes().await {
            Ok(bytes) => Ok((filename, bytes)),
            Err(e) => Err(api_error(StatusCode::BAD_REQUEST, e.body_text())),
        };
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /upload_resume
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn upload_resume(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match file_part(&mut multipart).await {
        Ok(part) => part,
        Err(resp) => return resp,
    };

    let extractor = state.resume.clone();
    let len = bytes.len();
    // PDF parsing is CPU-bound.
    let text = match tokio::task::spawn_blocking(move || extractor.extract(&bytes, &filename)).await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "resume extraction task failed");
            String::new()
        }
    };
    tracing::info!(bytes = len, chars = text.len(), "resume processed");

    Json(json!({ "resume_text": text })).into_response()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /transcribe
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn transcribe(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match file_part(&mut multipart).await {
        Ok(part) => part,
        Err(resp) => return resp,
    };
    let filename = if filename.is_empty() {
        "audio.webm".to_owned()
    } else {
        filename
    };

    let text = state.stt.transcribe(bytes.to_vec(), &filename).await;
    Json(json!({ "text": text })).into_response()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /speak
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct SpeakBody {
    pub text: String,
}

/// `audio/mpeg` bytes, or 204 when synthesis produced nothing.
pub async fn speak(State(state): State<AppState>, Json(body): Json<SpeakBody>) -> Response {
    match state.tts.synthesize(&body.text).await {
        Some(audio) => ([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
