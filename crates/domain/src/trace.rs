use serde::Serialize;

/// Structured trace events emitted across the interview crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionStarted {
        session_id: String,
        role: String,
        experience_level: String,
        has_resume: bool,
        max_questions: u32,
    },
    TurnAdvanced {
        session_id: String,
        question_count: u32,
        persona: String,
        terminal: bool,
    },
    PersonaDetected {
        persona: String,
        rule: String,
        word_count: usize,
    },
    FeedbackRequested {
        session_id: String,
        turns: usize,
        terminal: bool,
    },
    LlmRequest {
        provider: String,
        model: String,
        key_index: usize,
        attempt: usize,
        duration_ms: u64,
        ok: bool,
    },
    CredentialRotated {
        from_index: usize,
        to_index: usize,
        reason: String,
    },
    SessionRemoved {
        session_id: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ipp_event");
    }
}
