pub mod auth;
pub mod classifier;
pub mod gateway;
pub mod google;
pub mod openai_compat;
pub mod traits;
pub(crate) mod util;

// Re-exports for convenience.
pub use auth::{CredentialRing, KeyEntry};
pub use classifier::{FailureClassifier, FailureKind, SubstringClassifier};
pub use gateway::LlmGateway;
pub use traits::{GenerateRequest, LlmProvider};
pub use util::{keychain_fallback_env_name, resolve_credential};

use std::sync::Arc;

use ipp_domain::config::{LlmConfig, ProviderKind};
use ipp_domain::error::Result;

/// Build the configured provider adapter.
pub fn provider_from_config(cfg: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    Ok(match cfg.kind {
        ProviderKind::Google => Arc::new(google::GoogleProvider::from_config(cfg)?),
        ProviderKind::OpenaiCompat => Arc::new(openai_compat::OpenAiCompatProvider::from_config(cfg)?),
    })
}
