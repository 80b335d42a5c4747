//! AppState construction shared by `serve` and `practice`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sha2::{Digest, Sha256};

use ipp_domain::config::{Config, ConfigSeverity};
use ipp_media::{DocumentExtractor, OpenAiStt, OpenAiTts};
use ipp_persona::PersonaClassifier;
use ipp_providers::{CredentialRing, LlmGateway, LlmProvider};
use ipp_sessions::InMemorySessionStore;

use crate::runtime::Interviewer;
use crate::state::AppState;

/// Validate config, resolve credentials, build the provider and return a
/// fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    check_config(&config)?;

    let interviewer = Arc::new(interviewer_from_config(&config)?);
    let api_token_hash = api_token_hash(&config.server.api_token_env);
    Ok(assemble_state(config, interviewer, api_token_hash))
}

/// Log every config issue; fail when any of them is an error.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }
    Ok(())
}

/// Resolve the credential ring and provider described by `[llm]` and wrap
/// them in an [`Interviewer`]. Zero usable credentials is an error.
pub fn interviewer_from_config(config: &Config) -> anyhow::Result<Interviewer> {
    let ring = Arc::new(CredentialRing::from_sources(&config.llm.credentials));
    if ring.is_empty() {
        anyhow::bail!(
            "no LLM credential resolved from {} configured source(s); set GEMINI_API_KEY or edit [llm].credentials",
            config.llm.credentials.len()
        );
    }
    tracing::info!(credentials = ring.len(), "credential ring ready");

    let provider = ipp_providers::provider_from_config(&config.llm)
        .context("initializing LLM provider")?;
    tracing::info!(
        provider = provider.provider_id(),
        model = provider.model(),
        "LLM provider ready"
    );

    Ok(build_interviewer(config, provider, ring))
}

/// Wire an [`Interviewer`] around an already-built provider and ring.
pub fn build_interviewer(
    config: &Config,
    provider: Arc<dyn LlmProvider>,
    ring: Arc<CredentialRing>,
) -> Interviewer {
    let gateway = Arc::new(LlmGateway::new(
        provider,
        ring,
        Duration::from_millis(config.llm.timeout_ms),
    ));
    Interviewer::new(
        Arc::new(InMemorySessionStore::new()),
        gateway,
        PersonaClassifier::new(config.persona.clone()),
        config.interview.max_questions,
    )
}

/// Attach the media collaborators configured under `[voice]`.
pub fn assemble_state(
    config: Arc<Config>,
    interviewer: Arc<Interviewer>,
    api_token_hash: Option<Vec<u8>>,
) -> AppState {
    let stt = OpenAiStt::from_config(&config.voice);
    let tts = OpenAiTts::from_config(&config.voice);
    tracing::info!(
        stt = stt.is_enabled(),
        tts = tts.is_enabled(),
        "voice collaborators ready"
    );

    AppState {
        interviewer,
        resume: Arc::new(DocumentExtractor),
        stt: Arc::new(stt),
        tts: Arc::new(tts),
        api_token_hash,
        config,
    }
}

/// SHA-256 of the bearer token in `env_var`, or `None` (auth disabled)
/// when it is unset or empty.
pub fn api_token_hash(env_var: &str) -> Option<Vec<u8>> {
    match std::env::var(env_var).ok().filter(|t| !t.is_empty()) {
        Some(token) => {
            tracing::info!(source = %env_var, "API bearer-token auth enabled");
            Some(Sha256::digest(token.as_bytes()).to_vec())
        }
        None => {
            tracing::warn!("API bearer-token auth DISABLED, set the {env_var} env var to enable it");
            None
        }
    }
}
