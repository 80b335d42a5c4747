use ipp_domain::error::Result;

/// A single-shot text generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The user-side prompt.
    pub prompt: String,
    /// Optional system instruction sent alongside the prompt.
    pub instruction: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, instruction: Option<&str>) -> Self {
        Self {
            prompt: prompt.into(),
            instruction: instruction.map(str::to_owned),
        }
    }
}

/// Trait that every text generation adapter must implement.
///
/// The API key is passed per call so that credential rotation stays with
/// the caller ([`crate::LlmGateway`]).
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion and return its raw text.
    async fn generate(&self, req: &GenerateRequest, api_key: &str) -> Result<String>;

    /// A unique identifier for this provider instance.
    fn provider_id(&self) -> &str;

    /// Model used for generation.
    fn model(&self) -> &str;
}
