//! Text-to-speech over an OpenAI-compatible `/audio/speech` API.

use ipp_domain::config::VoiceConfig;
use ipp_domain::error::{Error, Result};

#[async_trait::async_trait]
pub trait TextToSpeech: Send + Sync {
    /// MP3 audio for `text`, or `None` when synthesis failed or is disabled.
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>>;
}

pub struct OpenAiTts {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    voice: String,
}

impl OpenAiTts {
    pub fn from_config(cfg: &VoiceConfig) -> Self {
        Self::new(
            &cfg.base_url,
            crate::voice_api_key(&cfg.api_key_env),
            &cfg.tts_model,
            &cfg.tts_voice,
            cfg.timeout_secs,
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: &str,
        voice: &str,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: crate::http_client(timeout_secs),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            voice: voice.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": self.voice,
            "response_format": "mp3",
        })
    }

    async fn request(&self, api_key: &str, text: &str) -> Result<Vec<u8>> {
        let url = format!("{}/audio/speech", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_body(text))
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Provider {
                provider: "tts".into(),
                message: format!("HTTP {} - {}", status.as_u16(), body),
            });
        }
        let bytes = resp.bytes().await.map_err(|e| Error::Http(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl TextToSpeech for OpenAiTts {
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        let api_key = self.api_key.as_deref()?;
        if text.trim().is_empty() {
            return None;
        }
        match self.request(api_key, text).await {
            Ok(audio) if !audio.is_empty() => Some(audio),
            Ok(_) => {
                tracing::warn!("speech synthesis returned no audio");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_configured_voice() {
        let tts = OpenAiTts::new("https://api.openai.com/v1/", None, "tts-1", "nova", 5);
        let body = tts.build_body("Hello");
        assert_eq!(body["voice"], "nova");
        assert_eq!(body["input"], "Hello");
        assert_eq!(body["response_format"], "mp3");
        assert_eq!(tts.base_url, "https://api.openai.com/v1");
    }

    #[tokio::test]
    async fn disabled_returns_none() {
        let tts = OpenAiTts::new("https://api.openai.com/v1", None, "tts-1", "alloy", 5);
        assert!(tts.synthesize("Hello").await.is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_returns_none() {
        let tts = OpenAiTts::new("http://127.0.0.1:9", Some("k".into()), "tts-1", "alloy", 2);
        assert!(tts.synthesize("Hello").await.is_none());
    }
}
