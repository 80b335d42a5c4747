//! Per-session concurrency control.
//!
//! Ensures only one turn runs per interview at a time. A second message for
//! the same session waits until the first turn, including its LLM call, has
//! finished.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Each session id maps to a `Semaphore(1)`. Holding the permit gives
/// exclusive access to that session's history and counter.
pub struct SessionLockMap {
    locks: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl Default for SessionLockMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLockMap {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wait for the session's permit. It releases on drop. Fails when the
    /// entry is forgotten while waiting.
    pub async fn acquire(&self, session_id: &str) -> Result<OwnedSemaphorePermit, LockClosed> {
        let sem = {
            let mut locks = self.locks.lock();
            locks
                .entry(session_id.to_owned())
                .or_insert_with(|| Arc::new(Semaphore::new(1)))
                .clone()
        };

        if let Ok(permit) = sem.clone().try_acquire_owned() {
            return Ok(permit);
        }
        tracing::debug!(session_id = %session_id, "waiting for in-flight turn");
        sem.acquire_owned().await.map_err(|_| LockClosed)
    }

    /// Drop the lock entry of a removed session and close its semaphore.
    /// A held permit stays valid until dropped; queued waiters get
    /// [`LockClosed`].
    pub fn forget(&self, session_id: &str) {
        if let Some(sem) = self.locks.lock().remove(session_id) {
            sem.close();
        }
    }

    /// Number of tracked sessions (for monitoring).
    pub fn session_count(&self) -> usize {
        self.locks.lock().len()
    }
}

/// Returned when a session's lock was closed while waiting for it.
#[derive(Debug)]
pub struct LockClosed;

impl std::fmt::Display for LockClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session lock closed, the session was removed")
    }
}

impl std::error::Error for LockClosed {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sequential_access() {
        let map = SessionLockMap::new();

        let permit1 = map.acquire("s1").await.unwrap();
        drop(permit1);

        let permit2 = map.acquire("s1").await.unwrap();
        drop(permit2);
    }

    #[tokio::test]
    async fn different_sessions_concurrent() {
        let map = Arc::new(SessionLockMap::new());

        let p1 = map.acquire("s1").await.unwrap();
        let p2 = map.acquire("s2").await.unwrap();
        assert_eq!(map.session_count(), 2);

        drop(p1);
        drop(p2);
    }

    #[tokio::test]
    async fn same_session_waits() {
        let map = Arc::new(SessionLockMap::new());
        let map2 = map.clone();

        let p1 = map.acquire("s1").await.unwrap();

        let handle = tokio::spawn(async move {
            let _p2 = map2.acquire("s1").await.unwrap();
            42
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        drop(p1);
        assert_eq!(handle.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn forget_drops_entry() {
        let map = SessionLockMap::new();
        drop(map.acquire("s1").await.unwrap());
        map.forget("s1");
        assert_eq!(map.session_count(), 0);
    }

    #[tokio::test]
    async fn forget_releases_waiters_with_error() {
        let map = Arc::new(SessionLockMap::new());
        let map2 = map.clone();

        let held = map.acquire("s1").await.unwrap();
        let waiter = tokio::spawn(async move { map2.acquire("s1").await.is_err() });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        map.forget("s1");
        assert!(waiter.await.unwrap());
        assert_eq!(map.session_count(), 0);
        drop(held);
    }

    #[test]
    fn forget_unknown_is_noop() {
        let map = SessionLockMap::new();
        map.forget("never-seen");
        assert_eq!(map.session_count(), 0);
    }
}
