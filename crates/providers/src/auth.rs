//! Credential rotation for rate-limited providers.
//!
//! [`CredentialRing`] holds the resolved API keys in configured order and a
//! shared cursor. The cursor only moves when a caller reports a transient
//! failure via [`CredentialRing::advance`], so every call starts from the
//! last key that worked. The ring is shared across sessions behind an `Arc`.

use ipp_domain::config::CredentialSource;
use ipp_domain::trace::TraceEvent;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::util::resolve_credential;

pub struct CredentialRing {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl CredentialRing {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Resolve every source in order. Sources that do not resolve are
    /// skipped with a warning, so the ring may end up empty.
    pub fn from_sources(sources: &[CredentialSource]) -> Self {
        let mut keys = Vec::with_capacity(sources.len());
        for (i, source) in sources.iter().enumerate() {
            match resolve_credential(source) {
                Ok(key) => keys.push(key),
                Err(e) => tracing::warn!(
                    source_index = i,
                    source = %source.describe(),
                    error = %e,
                    "credential source skipped"
                ),
            }
        }
        if keys.is_empty() {
            tracing::warn!("no API credentials resolved; text generation will fail");
        } else {
            tracing::info!(key_count = keys.len(), "credential ring ready");
        }
        Self::new(keys)
    }

    /// The key at the cursor, or `None` when the ring is empty.
    pub fn current(&self) -> Option<KeyEntry> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.load(Ordering::Acquire) % self.keys.len();
        Some(KeyEntry {
            index,
            key: self.keys[index].clone(),
        })
    }

    /// Move the cursor past `from` (wrapping) and return the new index.
    ///
    /// Only advances when the cursor still points at `from`, so two callers
    /// that failed on the same key rotate once between them.
    pub fn advance(&self, from: usize, reason: &str) -> usize {
        let len = self.keys.len();
        if len == 0 {
            return 0;
        }
        let to = (from + 1) % len;
        match self
            .cursor
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                TraceEvent::CredentialRotated {
                    from_index: from,
                    to_index: to,
                    reason: reason.to_string(),
                }
                .emit();
                to
            }
            Err(actual) => actual % len,
        }
    }

    pub fn cursor(&self) -> usize {
        match self.keys.len() {
            0 => 0,
            len => self.cursor.load(Ordering::Acquire) % len,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// Manual Debug impl to avoid leaking key values.
impl std::fmt::Debug for CredentialRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRing")
            .field("key_count", &self.keys.len())
            .field("cursor", &self.cursor())
            .finish()
    }
}

/// A key handed out by [`CredentialRing::current`].
///
/// Callers keep the `index` so they can report a failure with
/// [`CredentialRing::advance`].
#[derive(Clone)]
pub struct KeyEntry {
    pub index: usize,
    pub key: String,
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry").field("index", &self.index).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(keys: &[&str]) -> CredentialRing {
        CredentialRing::new(keys.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn current_does_not_move_cursor() {
        let r = ring(&["a", "b"]);
        assert_eq!(r.current().unwrap().key, "a");
        assert_eq!(r.current().unwrap().key, "a");
        assert_eq!(r.cursor(), 0);
    }

    #[test]
    fn advance_wraps() {
        let r = ring(&["a", "b", "c"]);
        assert_eq!(r.advance(0, "quota"), 1);
        assert_eq!(r.advance(1, "quota"), 2);
        assert_eq!(r.advance(2, "quota"), 0);
        assert_eq!(r.current().unwrap().key, "a");
    }

    #[test]
    fn stale_advance_is_ignored() {
        let r = ring(&["a", "b", "c"]);
        r.advance(0, "quota");
        // A second caller that also failed on key 0 must not skip key 1.
        assert_eq!(r.advance(0, "quota"), 1);
        assert_eq!(r.current().unwrap().key, "b");
    }

    #[test]
    fn empty_ring_has_no_current() {
        let r = ring(&[]);
        assert!(r.is_empty());
        assert!(r.current().is_none());
        assert_eq!(r.advance(0, "quota"), 0);
    }

    #[test]
    fn from_sources_skips_unresolved() {
        let var = "IPP_TEST_RING_KEY_5521";
        std::env::set_var(var, "resolved");
        let sources = vec![
            CredentialSource::env("IPP_TEST_RING_MISSING_5522"),
            CredentialSource::env(var),
        ];
        let r = CredentialRing::from_sources(&sources);
        assert_eq!(r.len(), 1);
        assert_eq!(r.current().unwrap().key, "resolved");
        std::env::remove_var(var);
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let r = ring(&["secret-key"]);
        let s = format!("{r:?} {:?}", r.current().unwrap());
        assert!(!s.contains("secret-key"));
        assert!(s.contains("key_count: 1"));
    }
}
