//! Resilient text generation.
//!
//! [`LlmGateway`] wraps one provider adapter with credential rotation, a
//! per-call timeout and failure classification. It never returns an error:
//! every failure path ends in a fixed apology that is safe to show to the
//! candidate, and the underlying error is logged.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ipp_domain::error::Error;
use ipp_domain::trace::TraceEvent;

use crate::auth::CredentialRing;
use crate::classifier::{FailureClassifier, FailureKind, SubstringClassifier};
use crate::traits::{GenerateRequest, LlmProvider};

/// Returned when every credential was rate limited in one call.
pub const EXHAUSTED_APOLOGY: &str = "I apologize, but all API keys have reached their daily limits. Please try again tomorrow or add more API keys.";

/// Returned on any non-rotating failure, including timeouts.
pub const CONNECTION_APOLOGY: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again.";

pub struct LlmGateway {
    provider: Arc<dyn LlmProvider>,
    ring: Arc<CredentialRing>,
    classifier: Arc<dyn FailureClassifier>,
    timeout: Duration,
}

impl LlmGateway {
    pub fn new(provider: Arc<dyn LlmProvider>, ring: Arc<CredentialRing>, timeout: Duration) -> Self {
        Self {
            provider,
            ring,
            classifier: Arc::new(SubstringClassifier::default()),
            timeout,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn FailureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn ring(&self) -> &Arc<CredentialRing> {
        &self.ring
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    /// Generate text for `prompt`, optionally with a system instruction.
    ///
    /// Makes at most one attempt per credential, starting at the ring's
    /// cursor. The result is trimmed.
    pub async fn generate(&self, prompt: &str, instruction: Option<&str>) -> String {
        let attempts = self.ring.len();
        if attempts == 0 {
            tracing::error!(provider = %self.provider.provider_id(), "no credentials available");
            return CONNECTION_APOLOGY.to_string();
        }

        let req = GenerateRequest::new(prompt, instruction);

        for attempt in 1..=attempts {
            let Some(entry) = self.ring.current() else {
                break;
            };

            let started = Instant::now();
            let result = match tokio::time::timeout(
                self.timeout,
                self.provider.generate(&req, &entry.key),
            )
            .await
            {
                Ok(r) => r,
                Err(_) => Err(Error::Timeout(format!(
                    "no response within {} ms",
                    self.timeout.as_millis()
                ))),
            };

            TraceEvent::LlmRequest {
                provider: self.provider.provider_id().to_string(),
                model: self.provider.model().to_string(),
                key_index: entry.index,
                attempt,
                duration_ms: started.elapsed().as_millis() as u64,
                ok: result.is_ok(),
            }
            .emit();

            let err = match result {
                Ok(text) => return text.trim().to_string(),
                Err(e) => e,
            };

            match self.classifier.classify(&err) {
                FailureKind::Transient => {
                    tracing::warn!(
                        key_index = entry.index,
                        attempt,
                        error = %err,
                        "rate limited, rotating credential"
                    );
                    self.ring.advance(entry.index, "rate_limited");
                    if attempt == attempts {
                        tracing::error!(key_count = attempts, "all credentials rate limited");
                        return EXHAUSTED_APOLOGY.to_string();
                    }
                }
                FailureKind::Permanent => {
                    tracing::error!(
                        key_index = entry.index,
                        error = %err,
                        "text generation failed"
                    );
                    return CONNECTION_APOLOGY.to_string();
                }
            }
        }

        CONNECTION_APOLOGY.to_string()
    }
}

impl std::fmt::Debug for LlmGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmGateway")
            .field("provider", &self.provider.provider_id())
            .field("ring", &self.ring)
            .field("timeout", &self.timeout)
            .finish()
    }
}
