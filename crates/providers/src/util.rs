//! Shared utility functions for provider adapters.

use ipp_domain::config::CredentialSource;
use ipp_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Build an HTTP client with the given total request timeout.
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(from_reqwest)
}

/// Resolve one API key from a [`CredentialSource`].
///
/// Precedence:
/// 1. `key` field (plaintext, warns)
/// 2. `service` + `account` from the OS keychain via `keyring`
/// 3. `env` field
/// 4. Fallback for keychain mode: env var `{SERVICE}_{ACCOUNT}` uppercased
/// 5. Error
///
/// Empty values count as unset.
pub fn resolve_credential(source: &CredentialSource) -> Result<String> {
    if let Some(ref key) = source.key {
        if !key.is_empty() {
            tracing::warn!(
                "API key loaded from plaintext config field 'key', \
                 prefer 'env' or keychain instead"
            );
            return Ok(key.clone());
        }
    }

    if let (Some(ref service), Some(ref account)) = (&source.service, &source.account) {
        match resolve_from_keychain(service, account) {
            Ok(secret) if !secret.is_empty() => return Ok(secret),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    service = %service,
                    account = %account,
                    error = %e,
                    "keychain lookup failed, falling through to env"
                );
            }
        }
    }

    if let Some(ref env_var) = source.env {
        return match std::env::var(env_var) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Err(Error::Auth(format!(
                "environment variable '{env_var}' not set or empty"
            ))),
        };
    }

    if let (Some(ref service), Some(ref account)) = (&source.service, &source.account) {
        let fallback_var = keychain_fallback_env_name(service, account);
        if let Ok(val) = std::env::var(&fallback_var) {
            if !val.is_empty() {
                tracing::info!(
                    env_var = %fallback_var,
                    "API key resolved from keychain fallback env var"
                );
                return Ok(val);
            }
        }
    }

    Err(Error::Auth(format!(
        "no API key available from {}",
        source.describe()
    )))
}

/// Read a secret from the OS keychain.
pub fn resolve_from_keychain(service: &str, account: &str) -> Result<String> {
    let entry = keyring::Entry::new(service, account)
        .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))?;
    entry
        .get_password()
        .map_err(|e| Error::Auth(format!("keyring get_password failed: {e}")))
}

/// Headless fallback env var name for a keychain service/account.
///
/// Example: `("ipp", "gemini-key")` -> `"IPP_GEMINI_KEY"`.
pub fn keychain_fallback_env_name(service: &str, account: &str) -> String {
    format!(
        "{}_{}",
        service.to_uppercase().replace('-', "_"),
        account.to_uppercase().replace('-', "_"),
    )
}
