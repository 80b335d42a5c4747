//! Speech-to-text over an OpenAI-compatible `/audio/transcriptions` API.

use ipp_domain::config::VoiceConfig;
use ipp_domain::error::{Error, Result};

#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio upload. Returns an empty string on any failure.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> String;
}

pub struct OpenAiStt {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiStt {
    pub fn from_config(cfg: &VoiceConfig) -> Self {
        Self::new(
            &cfg.base_url,
            crate::voice_api_key(&cfg.api_key_env),
            &cfg.stt_model,
            cfg.timeout_secs,
        )
    }

    pub fn new(base_url: &str, api_key: Option<String>, model: &str, timeout_secs: u64) -> Self {
        Self {
            client: crate::http_client(timeout_secs),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, audio: Vec<u8>, filename: &str) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| Error::Http(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Provider {
                provider: "stt".into(),
                message: format!("HTTP {} - {}", status.as_u16(), body),
            });
        }

        let json: serde_json::Value = serde_json::from_str(&body)?;
        Ok(json
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string())
    }
}

#[async_trait::async_trait]
impl SpeechToText for OpenAiStt {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("transcription requested but voice is disabled");
            return String::new();
        };
        if audio.is_empty() {
            return String::new();
        }
        let bytes = audio.len();
        match self.request(api_key, audio, filename).await {
            Ok(text) => {
                tracing::debug!(bytes, chars = text.len(), "audio transcribed");
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed");
                String::new()
            }
        }
    }
}
