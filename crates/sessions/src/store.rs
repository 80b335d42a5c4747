//! Session storage.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::session::InterviewSession;

/// Storage for interview sessions keyed by id.
///
/// Reads return clones; writers `put` the whole session back. Callers that
/// read-modify-write one session must serialize on it themselves.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &str) -> Option<InterviewSession>;
    fn put(&self, session: InterviewSession);
    fn remove(&self, id: &str) -> Option<InterviewSession>;
    fn list(&self) -> Vec<InterviewSession>;
    fn len(&self) -> usize;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-memory store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, InterviewSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &str) -> Option<InterviewSession> {
        self.sessions.read().get(id).cloned()
    }

    fn put(&self, session: InterviewSession) {
        self.sessions.write().insert(session.id.clone(), session);
    }

    fn remove(&self, id: &str) -> Option<InterviewSession> {
        let removed = self.sessions.write().remove(id);
        if removed.is_some() {
            tracing::debug!(session_id = %id, "session removed from store");
        }
        removed
    }

    /// Sessions ordered by creation time, newest first.
    fn list(&self) -> Vec<InterviewSession> {
        let mut all: Vec<InterviewSession> = self.sessions.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }

    fn contains(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }
}
