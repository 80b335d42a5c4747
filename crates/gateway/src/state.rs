use std::sync::Arc;

use ipp_domain::config::Config;
use ipp_media::{ResumeExtractor, SpeechToText, TextToSpeech};

use crate::runtime::Interviewer;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Interview state machine; owns the session store and session locks.
    pub interviewer: Arc<Interviewer>,

    // ── Media collaborators ───────────────────────────────────────────
    pub resume: Arc<dyn ResumeExtractor>,
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,

    // ── Security (startup-computed) ───────────────────────────────────
    /// SHA-256 hash of the API bearer token (read once at startup).
    /// `None` = dev mode (no auth enforced).
    pub api_token_hash: Option<Vec<u8>>,
}
