//! Provider failure classification.
//!
//! Decides whether a failed call should rotate to the next credential
//! (transient) or be reported to the candidate right away (permanent).

use ipp_domain::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limit or quota exhaustion: retry with the next credential.
    Transient,
    /// Anything else: give up immediately.
    Permanent,
}

pub trait FailureClassifier: Send + Sync {
    fn classify(&self, error: &Error) -> FailureKind;
}

/// Matches the error text against case-insensitive markers.
///
/// The default markers are `quota`, `rate limit` and `429`.
#[derive(Debug, Clone)]
pub struct SubstringClassifier {
    markers: Vec<String>,
}

impl SubstringClassifier {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.into().to_lowercase())
                .collect(),
        }
    }
}

impl Default for SubstringClassifier {
    fn default() -> Self {
        Self::new(["quota", "rate limit", "429"])
    }
}

impl FailureClassifier for SubstringClassifier {
    fn classify(&self, error: &Error) -> FailureKind {
        // Timeouts never rotate.
        if matches!(error, Error::Timeout(_)) {
            return FailureKind::Permanent;
        }
        let text = error.to_string().to_lowercase();
        if self.markers.iter().any(|m| text.contains(m.as_str())) {
            FailureKind::Transient
        } else {
            FailureKind::Permanent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_err(message: &str) -> Error {
        Error::Provider {
            provider: "gemini".into(),
            message: message.into(),
        }
    }

    #[test]
    fn http_429_is_transient() {
        let c = SubstringClassifier::default();
        assert_eq!(
            c.classify(&provider_err("HTTP 429 - Too Many Requests")),
            FailureKind::Transient
        );
    }

    #[test]
    fn quota_text_is_transient_case_insensitive() {
        let c = SubstringClassifier::default();
        assert_eq!(
            c.classify(&provider_err("HTTP 400 - Quota exceeded for metric")),
            FailureKind::Transient
        );
        assert_eq!(
            c.classify(&Error::Http("Rate Limit reached".into())),
            FailureKind::Transient
        );
    }

    #[test]
    fn other_errors_are_permanent() {
        let c = SubstringClassifier::default();
        assert_eq!(
            c.classify(&provider_err("HTTP 401 - API key not valid")),
            FailureKind::Permanent
        );
        assert_eq!(
            c.classify(&Error::Timeout("quota endpoint slow".into())),
            FailureKind::Permanent
        );
    }
}
