//! The interview state machine.
//!
//! [`Interviewer`] drives a session from its greeting through a fixed number
//! of answered questions to the terminal phase, and produces the final
//! feedback. Every turn of one session runs under that session's lock, so
//! history appends and counter increments never interleave.

use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;

use ipp_domain::persona::Persona;
use ipp_domain::trace::TraceEvent;
use ipp_domain::turn::Turn;
use ipp_persona::PersonaClassifier;
use ipp_prompts::{PromptComposer, SystemContext};
use ipp_providers::LlmGateway;
use ipp_sessions::{InterviewSession, SessionStore};

use super::session_lock::SessionLockMap;

/// Reply to any message after the interview has concluded.
pub const ALREADY_OVER: &str = "The interview is already over. Please request feedback.";

/// Final interviewer turn once the question limit is reached.
pub const CLOSING: &str = "Thank you for your time today. That covers all the questions I had planned. Let me now provide you with detailed feedback on your performance.";

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("Session not found")]
    SessionNotFound(String),

    #[error("role must not be empty")]
    EmptyRole,
}

#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub session_id: String,
    pub greeting: String,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub message: String,
    pub terminal: bool,
}

pub struct Interviewer {
    store: Arc<dyn SessionStore>,
    locks: SessionLockMap,
    gateway: Arc<LlmGateway>,
    classifier: PersonaClassifier,
    composer: PromptComposer,
    max_questions: u32,
}

impl Interviewer {
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: Arc<LlmGateway>,
        classifier: PersonaClassifier,
        max_questions: u32,
    ) -> Self {
        Self {
            store,
            locks: SessionLockMap::new(),
            gateway,
            classifier,
            composer: PromptComposer::new(),
            max_questions,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Open a new interview and generate the greeting plus first question.
    pub async fn start(
        &self,
        role: &str,
        experience_level: &str,
        resume: Option<String>,
    ) -> Result<StartOutcome, InterviewError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(InterviewError::EmptyRole);
        }

        // Not yet stored, so no other caller can reach it.
        let mut session = InterviewSession::new(role, experience_level, resume, self.max_questions);

        let system = self.composer.system_instruction(&SystemContext {
            role: &session.role,
            experience_level: &session.experience_level,
            question_number: 1,
            max_questions: session.max_questions,
            resume: session.resume(),
            persona: None,
        });
        let prompt = self.composer.initial_prompt(&session.role);
        let greeting = self.gateway.generate(&prompt, Some(&system)).await;

        session.push(Turn::model(greeting.clone()));

        TraceEvent::SessionStarted {
            session_id: session.id.clone(),
            role: session.role.clone(),
            experience_level: session.experience_level.clone(),
            has_resume: session.resume().is_some(),
            max_questions: session.max_questions,
        }
        .emit();

        let session_id = session.id.clone();
        self.store.put(session);
        Ok(StartOutcome {
            session_id,
            greeting,
        })
    }

    /// Record the candidate's answer and produce the next interviewer turn.
    pub async fn advance(&self, session_id: &str, message: &str) -> Result<TurnOutcome, InterviewError> {
        let (_permit, mut session) = self.lock_existing(session_id).await?;

        if session.is_terminal() {
            tracing::debug!(session_id = %session_id, "message after interview end");
            return Ok(TurnOutcome {
                message: ALREADY_OVER.to_string(),
                terminal: true,
            });
        }

        session.push(Turn::user(message));
        let classification = self.classifier.classify_with_rule(message, &session.history);
        TraceEvent::PersonaDetected {
            persona: classification.persona.to_string(),
            rule: classification.rule.to_string(),
            word_count: classification.word_count,
        }
        .emit();

        let answered = session.record_answer();

        let outcome = if session.limit_reached() {
            session.conclude();
            session.push(Turn::model(CLOSING));
            TurnOutcome {
                message: CLOSING.to_string(),
                terminal: true,
            }
        } else {
            let reply = self
                .next_question(&session, answered + 1, classification.persona)
                .await;
            session.push(Turn::model(reply.clone()));
            TurnOutcome {
                message: reply,
                terminal: false,
            }
        };

        TraceEvent::TurnAdvanced {
            session_id: session.id.clone(),
            question_count: session.question_count,
            persona: classification.persona.to_string(),
            terminal: outcome.terminal,
        }
        .emit();

        self.store.put(session);
        Ok(outcome)
    }

    async fn next_question(&self, session: &InterviewSession, question_number: u32, persona: Persona) -> String {
        let system = self.composer.system_instruction(&SystemContext {
            role: &session.role,
            experience_level: &session.experience_level,
            question_number,
            max_questions: session.max_questions,
            resume: session.resume(),
            persona: Some(persona),
        });
        let prompt = self.composer.next_question_prompt(&session.history);
        self.gateway.generate(&prompt, Some(&system)).await
    }

    /// Spoken feedback over the full transcript. Allowed in either phase;
    /// never changes the session.
    pub async fn feedback(&self, session_id: &str) -> Result<String, InterviewError> {
        let session = self
            .store
            .get(session_id)
            .ok_or_else(|| InterviewError::SessionNotFound(session_id.to_owned()))?;

        TraceEvent::FeedbackRequested {
            session_id: session.id.clone(),
            turns: session.history.len(),
            terminal: session.is_terminal(),
        }
        .emit();

        let prompt = self.composer.feedback_prompt(&session.history);
        Ok(self.gateway.generate(&prompt, None).await)
    }

    pub fn snapshot(&self, session_id: &str) -> Result<InterviewSession, InterviewError> {
        self.store
            .get(session_id)
            .ok_or_else(|| InterviewError::SessionNotFound(session_id.to_owned()))
    }

    /// Delete a session once any in-flight turn on it has finished. Turns
    /// queued behind the deletion fail with `SessionNotFound`.
    pub async fn remove(&self, session_id: &str) -> Result<(), InterviewError> {
        let (permit, _) = self.lock_existing(session_id).await?;
        self.store.remove(session_id);
        self.locks.forget(session_id);
        drop(permit);

        TraceEvent::SessionRemoved {
            session_id: session_id.to_owned(),
        }
        .emit();
        Ok(())
    }

    /// Lock a stored session and return it as read under the lock. Unknown
    /// ids are rejected before any lock entry is created.
    async fn lock_existing(
        &self,
        session_id: &str,
    ) -> Result<(OwnedSemaphorePermit, InterviewSession), InterviewError> {
        let not_found = || InterviewError::SessionNotFound(session_id.to_owned());
        if !self.store.contains(session_id) {
            return Err(not_found());
        }

        let permit = self
            .locks
            .acquire(session_id)
            .await
            .map_err(|_| not_found())?;

        match self.store.get(session_id) {
            Some(session) => Ok((permit, session)),
            None => {
                // Removed between the check and the lock.
                drop(permit);
                self.locks.forget(session_id);
                Err(not_found())
            }
        }
    }
}
