//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::{ProviderConfig, SamplingParams};
use crate::constants::{generation, network, reddit};
use crate::types::{PersonaError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Reddit API credentials and fetch limits
    pub reddit: RedditConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Fallback keyword classifier rules
    pub classifier: ClassifierConfig,

    /// Persona output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            reddit: RedditConfig::default(),
            llm: LlmConfig::default(),
            classifier: ClassifierConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(PersonaError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if !(self.llm.top_p > 0.0 && self.llm.top_p <= 1.0) {
            return Err(PersonaError::Config(format!(
                "LLM top_p must be in (0.0, 1.0], got {}",
                self.llm.top_p
            )));
        }

        if self.llm.timeout_secs == 0 || self.reddit.timeout_secs == 0 {
            return Err(PersonaError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_new_tokens >= self.llm.context_window {
            return Err(PersonaError::Config(format!(
                "max_new_tokens ({}) must be smaller than context_window ({})",
                self.llm.max_new_tokens, self.llm.context_window
            )));
        }

        for (name, limit) in [
            ("post_limit", self.reddit.post_limit),
            ("comment_limit", self.reddit.comment_limit),
        ] {
            if limit > reddit::MAX_LISTING_LIMIT {
                return Err(PersonaError::Config(format!(
                    "reddit.{} must be at most {}, got {}",
                    name,
                    reddit::MAX_LISTING_LIMIT,
                    limit
                )));
            }
        }

        Ok(())
    }

    /// Provider settings derived from the `[llm]` table
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.llm.provider.clone(),
            model: Some(self.llm.model.clone()),
            timeout_secs: self.llm.timeout_secs,
            api_key: self.llm.api_key.clone(),
            api_base: self.llm.api_base.clone(),
        }
    }

    /// Sampling settings derived from the `[llm]` table
    pub fn sampling_params(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.llm.temperature,
            top_p: self.llm.top_p,
            max_new_tokens: self.llm.max_new_tokens,
        }
    }
}

// =============================================================================
// Reddit Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// OAuth application id (REDDIT_CLIENT_ID)
    pub client_id: Option<String>,

    /// OAuth application secret (REDDIT_CLIENT_SECRET). Never serialized.
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,

    /// User-Agent header sent to Reddit
    pub user_agent: String,

    /// Most recent submissions to fetch
    pub post_limit: u32,

    /// Most recent comments to fetch
    pub comment_limit: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RedditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user_agent", &self.user_agent)
            .field("post_limit", &self.post_limit)
            .field("comment_limit", &self.comment_limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: reddit::DEFAULT_USER_AGENT.to_string(),
            post_limit: reddit::DEFAULT_POST_LIMIT,
            comment_limit: reddit::DEFAULT_COMMENT_LIMIT,
            timeout_secs: 30,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "ollama" or "openai"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Custom endpoint (provider default when unset)
    pub api_base: Option<String>,

    /// API key for OpenAI-compatible servers. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: f32,

    /// Tokens reserved for, and requested from, the model
    pub max_new_tokens: usize,

    /// Model context window; the prompt gets `context_window - max_new_tokens`
    pub context_window: usize,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("context_window", &self.context_window)
            .finish()
    }
}

impl LlmConfig {
    /// Prompt token budget
    pub fn prompt_budget(&self) -> usize {
        self.context_window.saturating_sub(self.max_new_tokens)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "gpt2".to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: generation::TEMPERATURE,
            top_p: generation::TOP_P,
            max_new_tokens: generation::MAX_NEW_TOKENS,
            context_window: generation::CONTEXT_WINDOW,
        }
    }
}

// =============================================================================
// Classifier Configuration
// =============================================================================

/// Keyword rules for the fallback persona builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Subreddits whose items are classified (case-insensitive)
    pub subreddits: Vec<String>,

    /// Keywords marking a frustration
    pub frustration_keywords: Vec<String>,

    /// Keywords marking a behavior
    pub behavior_keywords: Vec<String>,

    /// Keywords marking a motivation and a goal
    pub motivation_keywords: Vec<String>,

    /// Keywords marking a personality trait and quote
    pub personality_keywords: Vec<String>,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            subreddits: strings(&["manorlords", "chatgpt"]),
            frustration_keywords: strings(&["issue", "problem", "burned"]),
            behavior_keywords: strings(&["play", "game"]),
            motivation_keywords: strings(&["hope", "new"]),
            personality_keywords: strings(&["incredible", "great"]),
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `<username>_persona.txt`
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.reddit.post_limit, 10);
        assert_eq!(config.reddit.comment_limit, 50);
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prompt_budget() {
        let llm = LlmConfig::default();
        assert_eq!(llm.prompt_budget(), 768);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.top_p = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.max_new_tokens = 2048;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reddit.comment_limit = 500;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reddit.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = Config::default();
        config.reddit.client_secret = Some("hunter2".to_string());
        config.llm.api_key = Some("sk-abc".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("sk-abc"));
        assert!(!format!("{:?}", config.reddit).contains("hunter2"));
    }

    #[test]
    fn test_provider_config_from_llm() {
        let mut config = Config::default();
        config.llm.model = "tinyllama".to_string();
        let provider = config.provider_config();
        assert_eq!(provider.provider, "ollama");
        assert_eq!(provider.model.as_deref(), Some("tinyllama"));

        let params = config.sampling_params();
        assert_eq!(params.max_new_tokens, 256);
    }
}
