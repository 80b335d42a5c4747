use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ipp_domain::turn::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Active,
    /// The question limit was reached. There is no way back to `Active`.
    Terminal,
}

/// One mock interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub role: String,
    pub experience_level: String,
    /// Extracted resume text; empty when none was supplied.
    pub resume_text: String,
    pub history: Vec<Turn>,
    /// Answers received so far. Only ever incremented.
    pub question_count: u32,
    pub max_questions: u32,
    pub phase: SessionPhase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewSession {
    /// Create an active session with a fresh UUIDv4 id and no turns.
    pub fn new(
        role: impl Into<String>,
        experience_level: impl Into<String>,
        resume_text: Option<String>,
        max_questions: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: role.into(),
            experience_level: experience_level.into(),
            resume_text: resume_text.unwrap_or_default(),
            history: Vec::new(),
            question_count: 0,
            max_questions,
            phase: SessionPhase::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    pub fn resume(&self) -> Option<&str> {
        Some(self.resume_text.as_str()).filter(|r| !r.trim().is_empty())
    }

    pub fn push(&mut self, turn: Turn) {
        self.history.push(turn);
        self.updated_at = Utc::now();
    }

    /// Count one more answer and return the new total.
    pub fn record_answer(&mut self) -> u32 {
        self.question_count = self.question_count.saturating_add(1);
        self.updated_at = Utc::now();
        self.question_count
    }

    pub fn limit_reached(&self) -> bool {
        self.question_count >= self.max_questions
    }

    pub fn conclude(&mut self) {
        self.phase = SessionPhase::Terminal;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_active_and_empty() {
        let s = InterviewSession::new("Backend Developer", "Junior", None, 15);
        assert_eq!(s.phase, SessionPhase::Active);
        assert_eq!(s.question_count, 0);
        assert!(s.history.is_empty());
        assert!(s.resume().is_none());
        assert!(uuid::Uuid::parse_str(&s.id).is_ok());
    }

    #[test]
    fn ids_are_unique() {
        let a = InterviewSession::new("r", "Junior", None, 15);
        let b = InterviewSession::new("r", "Junior", None, 15);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn limit_tracks_counter() {
        let mut s = InterviewSession::new("r", "Junior", None, 2);
        assert_eq!(s.record_answer(), 1);
        assert!(!s.limit_reached());
        assert_eq!(s.record_answer(), 2);
        assert!(s.limit_reached());
    }

    #[test]
    fn conclude_is_sticky() {
        let mut s = InterviewSession::new("r", "Junior", Some("Rust".into()), 1);
        s.conclude();
        s.conclude();
        assert!(s.is_terminal());
        assert_eq!(s.resume(), Some("Rust"));
    }

    #[test]
    fn snapshot_serializes_phase_and_turn_roles() {
        let mut s = InterviewSession::new("r", "Senior", None, 15);
        s.push(Turn::model("Hello"));
        s.push(Turn::user("Hi"));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["phase"], "active");
        assert_eq!(json["history"][0]["role"], "model");
        assert_eq!(json["history"][1]["content"], "Hi");
    }
}
