use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Text generation provider
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    /// Identifier used in logs and trace events.
    #[serde(default = "d_provider_id")]
    pub id: String,
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_model")]
    pub model: String,
    /// Upper bound for a single provider call. Expiry is reported to the
    /// candidate as a connection problem.
    #[serde(default = "d_20000u")]
    pub timeout_ms: u64,
    /// Ordered credentials for rate-limit rotation. Sources that do not
    /// resolve at startup are skipped.
    #[serde(default = "d_credentials")]
    pub credentials: Vec<CredentialSource>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            id: d_provider_id(),
            base_url: d_base_url(),
            model: d_model(),
            timeout_ms: d_20000u(),
            credentials: d_credentials(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`.
    #[default]
    Google,
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    OpenaiCompat,
}

/// Where one API key comes from.
///
/// Resolution order: `key` (plaintext), `service` + `account` (OS
/// keychain), `env`, then the `{SERVICE}_{ACCOUNT}` env fallback.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CredentialSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl CredentialSource {
    pub fn env(name: impl Into<String>) -> Self {
        Self {
            env: Some(name.into()),
            ..Self::default()
        }
    }

    /// A source needs at least one of `key`, `env`, or a complete
    /// `service` + `account` pair.
    pub fn is_well_formed(&self) -> bool {
        self.key.is_some()
            || self.env.is_some()
            || (self.service.is_some() && self.account.is_some())
    }

    /// Short description for logs. Never includes the key itself.
    pub fn describe(&self) -> String {
        if self.key.is_some() {
            "inline key".into()
        } else if let (Some(service), Some(account)) = (&self.service, &self.account) {
            format!("keychain {service}/{account}")
        } else if let Some(env) = &self.env {
            format!("env {env}")
        } else {
            "empty source".into()
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_provider_id() -> String {
    "gemini".into()
}
fn d_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn d_model() -> String {
    "gemini-2.0-flash".into()
}
fn d_20000u() -> u64 {
    20_000
}
fn d_credentials() -> Vec<CredentialSource> {
    vec![
        CredentialSource::env("GEMINI_API_KEY"),
        CredentialSource::env("GEMINI_API_KEY_2"),
        CredentialSource::env("GEMINI_API_KEY_3"),
    ]
}
