//! OpenAI-compatible adapter.
//!
//! Works with OpenAI, Ollama, vLLM, LM Studio, Together, and any other
//! endpoint that follows the chat completions contract. The instruction is
//! sent as a `system` message ahead of the prompt.

use crate::traits::{GenerateRequest, LlmProvider};
use crate::util::{from_reqwest, http_client};
use ipp_domain::config::LlmConfig;
use ipp_domain::error::{Error, Result};
use serde_json::Value;
use std::time::Duration;

pub struct OpenAiCompatProvider {
    id: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            client: http_client(Duration::from_millis(cfg.timeout_ms))?,
        })
    }

    fn build_body(&self, req: &GenerateRequest) -> Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(instruction) = req.instruction.as_deref() {
            messages.push(serde_json::json!({"role": "system", "content": instruction}));
        }
        messages.push(serde_json::json!({"role": "user", "content": req.prompt}));
        serde_json::json!({
            "model": self.model,
            "messages": messages,
        })
    }
}

fn parse_chat_response(provider: &str, body: &Value) -> Result<String> {
    let message = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| Error::Provider {
            provider: provider.to_string(),
            message: "no choices in response".into(),
        })?;

    Ok(message
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string())
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn generate(&self, req: &GenerateRequest, api_key: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_body(req);

        tracing::debug!(provider = %self.id, url = %url, "openai_compat generate request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
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
        parse_chat_response(&self.id, &resp_json)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipp_domain::config::ProviderKind;

    fn provider() -> OpenAiCompatProvider {
        let cfg = LlmConfig {
            kind: ProviderKind::OpenaiCompat,
            id: "local".into(),
            base_url: "http://localhost:11434/v1/".into(),
            model: "llama3".into(),
            ..LlmConfig::default()
        };
        OpenAiCompatProvider::from_config(&cfg).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        assert_eq!(provider().base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn system_message_precedes_prompt() {
        let body = provider().build_body(&GenerateRequest::new("next?", Some("be brief")));
        assert_eq!(body["model"], "llama3");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "next?");
    }

    #[test]
    fn prompt_only_without_instruction() {
        let body = provider().build_body(&GenerateRequest::new("feedback", None));
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn parses_first_choice() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Tell me more."}}]
        });
        assert_eq!(parse_chat_response("local", &body).unwrap(), "Tell me more.");
        assert!(parse_chat_response("local", &serde_json::json!({"choices": []})).is_err());
    }
}
