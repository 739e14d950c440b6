//! LLM Provider Abstraction
//!
//! Backends continue a raw prompt with the given sampling settings; there is
//! no chat template and no structured output.

mod http_utils;
mod ollama;
mod openai;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{generation, network};
use crate::types::{PersonaError, Result};

// =============================================================================
// Continuation Result
// =============================================================================

/// Generated continuation of a prompt
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Newly generated text; the prompt is not echoed
    pub text: String,
    pub usage: TokenUsage,
    /// Wall-clock time of the request
    pub elapsed: Duration,
}

impl LlmResponse {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Token counts reported by the backend, when it reports them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.prompt_tokens, self.completion_tokens) {
            (Some(prompt), Some(completion)) => {
                write!(f, "{} prompt + {} generated tokens", prompt, completion)
            }
            (None, Some(completion)) => write!(f, "{} generated tokens", completion),
            _ => write!(f, "token usage not reported"),
        }
    }
}

/// Shared LLM provider handle.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Sampling Parameters
// =============================================================================

/// Sampling settings sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Softmax temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Maximum tokens to generate
    pub max_new_tokens: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: generation::TEMPERATURE,
            top_p: generation::TOP_P,
            max_new_tokens: generation::MAX_NEW_TOKENS,
        }
    }
}

// =============================================================================
// Provider Selection
// =============================================================================

/// Names accepted by [`create_provider`]
pub const SUPPORTED_PROVIDERS: &[&str] = &["ollama", "openai"];

/// Backend selection and connection settings, derived from `[llm]`
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// One of [`SUPPORTED_PROVIDERS`]
    pub provider: String,
    /// Backend default when unset
    pub model: Option<String>,
    pub timeout_secs: u64,
    /// Only read by the OpenAI-compatible backend. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Backend default endpoint when unset
    #[serde(default)]
    pub api_base: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: SUPPORTED_PROVIDERS[0].to_string(),
            model: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            api_key: None,
            api_base: None,
        }
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Text-continuation backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Continue `prompt`. The response holds only the new text.
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<LlmResponse>;

    /// Short backend name used in logs ("ollama", "openai")
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// Whether the backend answers and serves the configured model
    async fn health_check(&self) -> Result<bool>;
}

/// Build the backend named in `config.provider` (case-insensitive)
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider.to_lowercase().as_str() {
        "ollama" => Ok(Arc::new(OllamaProvider::new(config.clone())?)),
        "openai" => Ok(Arc::new(OpenAiProvider::new(config.clone())?)),
        _ => Err(PersonaError::Config(format!(
            "Unknown provider: {}. Supported: {}",
            config.provider,
            SUPPORTED_PROVIDERS.join(", ")
        ))),
    }
}
