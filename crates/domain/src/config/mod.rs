mod interview;
mod llm;
mod observability;
mod server;
mod voice;

pub use interview::*;
pub use llm::*;
pub use observability::*;
pub use server::*;
pub use voice::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good. Callers refuse to
    /// start when any issue has [`ConfigSeverity::Error`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }
        if self.server.max_upload_bytes == 0 {
            errors.push(ConfigError::error(
                "server.max_upload_bytes",
                "upload limit must be greater than 0",
            ));
        }

        if self.llm.base_url.is_empty() {
            errors.push(ConfigError::error("llm.base_url", "base_url must not be empty"));
        }
        if self.llm.model.is_empty() {
            errors.push(ConfigError::error("llm.model", "model must not be empty"));
        }
        if self.llm.timeout_ms == 0 {
            errors.push(ConfigError::error("llm.timeout_ms", "timeout must be greater than 0"));
        }
        if self.llm.credentials.is_empty() {
            errors.push(ConfigError::warning(
                "llm.credentials",
                "no credentials configured; every generation will fail",
            ));
        }
        for (i, source) in self.llm.credentials.iter().enumerate() {
            if !source.is_well_formed() {
                errors.push(ConfigError::error(
                    format!("llm.credentials[{i}]"),
                    "set `env`, `key`, or both `service` and `account`",
                ));
            }
        }

        if self.interview.max_questions == 0 {
            errors.push(ConfigError::error(
                "interview.max_questions",
                "max_questions must be at least 1",
            ));
        }

        if self.persona.efficient_max <= self.persona.efficient_min_exclusive {
            errors.push(ConfigError::warning(
                "persona.efficient_max",
                "efficient range is empty; no answer will be classified efficient",
            ));
        }
        if self.persona.pattern.min_user_turns == 0 {
            errors.push(ConfigError::error(
                "persona.pattern.min_user_turns",
                "min_user_turns must be at least 1",
            ));
        }

        if self.voice.timeout_secs == 0 {
            errors.push(ConfigError::error("voice.timeout_secs", "timeout must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.observability.sample_rate) {
            errors.push(ConfigError::error(
                "observability.sample_rate",
                "sample_rate must be between 0.0 and 1.0",
            ));
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError::warning(
                "server.cors.allowed_origins",
                "wildcard \"*\" allows all origins (not recommended for production)",
            ));
        }

        errors
    }
}
