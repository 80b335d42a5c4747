//! Media collaborators: resume text extraction, speech-to-text and
//! text-to-speech.
//!
//! None of these surface errors to callers. Failures are logged and turn
//! into an empty (or explanatory) result so the interview can continue.

pub mod resume;
pub mod stt;
pub mod tts;

pub use resume::{DocumentExtractor, DocumentFormat, ResumeExtractor, UNSUPPORTED_FORMAT};
pub use stt::{OpenAiStt, SpeechToText};
pub use tts::{OpenAiTts, TextToSpeech};

/// Read the voice API key named by `env_var`. Unset or empty disables voice.
pub(crate) fn voice_api_key(env_var: &str) -> Option<String> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Some(key),
        _ => {
            tracing::info!(env_var = %env_var, "voice API key not set, voice features disabled");
            None
        }
    }
}

pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "voice HTTP client build failed, using defaults");
            reqwest::Client::new()
        })
}
