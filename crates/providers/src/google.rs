//! Google Gemini adapter.
//!
//! Calls `generateContent` with the prompt as a single user turn and the
//! instruction as `systemInstruction`. Auth is an API key passed as a query
//! parameter (`key={api_key}`).

use crate::traits::{GenerateRequest, LlmProvider};
use crate::util::{from_reqwest, http_client};
use ipp_domain::config::LlmConfig;
use ipp_domain::error::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// A text generation adapter for the Google Gemini API.
pub struct GoogleProvider {
    id: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            client: http_client(Duration::from_millis(cfg.timeout_ms))?,
        })
    }

    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        )
    }
}

fn build_body(req: &GenerateRequest) -> Value {
    let mut body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": req.prompt}],
        }],
    });
    if let Some(instruction) = req.instruction.as_deref() {
        body["systemInstruction"] = serde_json::json!({
            "parts": [{"text": instruction}]
        });
    }
    body
}

/// Concatenate the text parts of the first candidate.
fn parse_gemini_response(provider: &str, body: &Value) -> Result<String> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Provider {
            provider: provider.to_string(),
            message: "no candidates in response".into(),
        })?;

    let text: String = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .get("finishReason")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        return Err(Error::Provider {
            provider: provider.to_string(),
            message: format!("empty response (finishReason {reason})"),
        });
    }
    Ok(text)
}

/// Redact API key from URL for safe logging.
fn redact_url_key(url: &str) -> String {
    if let Some(idx) = url.find("key=") {
        let prefix = &url[..idx + 4];
        let rest = &url[idx + 4..];
        let end = rest.find('&').unwrap_or(rest.len());
        format!("{prefix}[REDACTED]{}", &rest[end..])
    } else {
        url.to_string()
    }
}

#[async_trait::async_trait]
impl LlmProvider for GoogleProvider {
    async fn generate(&self, req: &GenerateRequest, api_key: &str) -> Result<String> {
        let url = self.generate_url(api_key);
        let body = build_body(req);

        tracing::debug!(provider = %self.id, url = %redact_url_key(&url), "google generate request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_gemini_response(&self.id, &resp_json)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }

    fn model(&self) -> &str {
        &self.model
    }
}
