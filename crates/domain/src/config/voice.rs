use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Speech (OpenAI-compatible audio API)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Transcription and speech synthesis settings. Voice features are
/// disabled (empty results) when the key env var is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "d_stt_model")]
    pub stt_model: String,
    #[serde(default = "d_tts_model")]
    pub tts_model: String,
    #[serde(default = "d_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "d_30")]
    pub timeout_secs: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            api_key_env: d_api_key_env(),
            stt_model: d_stt_model(),
            tts_model: d_tts_model(),
            tts_voice: d_tts_voice(),
            timeout_secs: d_30(),
        }
    }
}

fn d_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn d_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn d_stt_model() -> String {
    "whisper-1".into()
}
fn d_tts_model() -> String {
    "tts-1".into()
}
fn d_tts_voice() -> String {
    "alloy".into()
}
fn d_30() -> u64 {
    30
}
