//! OpenAI-Compatible Completions Backend
//!
//! Legacy `POST /completions`, which continues a prompt rather than
//! answering a chat. Also works with self-hosted servers exposing the same
//! API (vLLM, llama.cpp server, text-generation-inference).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{LlmProvider, LlmResponse, ProviderConfig, SamplingParams, TokenUsage, http_utils};
use crate::types::{PersonaError, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const SERVICE: &str = "openai";

pub struct OpenAiProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiProvider {
    /// Key from config, else `OPENAI_API_KEY`
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(SecretString::from)
            .ok_or_else(|| {
                PersonaError::Config(format!(
                    "OpenAI API key not found. Set {} or llm.api_key",
                    API_KEY_ENV
                ))
            })?;

        let api_base = http_utils::validate_endpoint(
            config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            SERVICE,
            false,
        )?;

        Ok(Self {
            api_key,
            api_base,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client: http_utils::build_client(config.timeout_secs, SERVICE)?,
        })
    }

    fn request<'a>(&'a self, prompt: &'a str, params: &SamplingParams) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<LlmResponse> {
        info!(
            "Generating with OpenAI-compatible API (model: {}, temperature: {}, top_p: {})",
            self.model, params.temperature, params.top_p
        );

        let url = format!("{}/completions", self.api_base);
        debug!("POST {}", url);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request(prompt, params))
            .send()
            .await
            .map_err(|e| http_utils::request_error(e, SERVICE))?;

        if !response.status().is_success() {
            return Err(http_utils::status_error(response, SERVICE).await);
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| http_utils::request_error(e, SERVICE))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| PersonaError::llm("No choices in completion response"))?;

        Ok(LlmResponse {
            text,
            usage: TokenUsage {
                prompt_tokens: body.usage.as_ref().map(|u| u.prompt_tokens),
                completion_tokens: body.usage.as_ref().map(|u| u.completion_tokens),
            },
            elapsed: start.elapsed(),
        })
    }

    fn name(&self) -> &str {
        SERVICE
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.api_base);

        match self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => Ok(true),
            Ok(resp) => {
                warn!("OpenAI-compatible model listing failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("OpenAI-compatible API not reachable: {}", e);
                Ok(false)
            }
        }
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: usize,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new(ProviderConfig {
            provider: "openai".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", provider());
        assert!(!debug.contains("sk-test"));
    }

    #[test]
    fn test_request_shape() {
        let provider = provider();
        let params = SamplingParams::default();
        let json = serde_json::to_value(provider.request("Reddit user", &params)).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["prompt"], "Reddit user");
        assert_eq!(json["max_tokens"], 256);
    }

    #[test]
    fn test_custom_base_keeps_path() {
        let provider = OpenAiProvider::new(ProviderConfig {
            provider: "openai".to_string(),
            api_key: Some("local".to_string()),
            api_base: Some("http://localhost:8000/v1/".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.api_base, "http://localhost:8000/v1");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"id":"cmpl-1","choices":[{"text":"\n**Summary:**","index":0}],"usage":{"prompt_tokens":10,"completion_tokens":3,"total_tokens":13}}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].text, "\n**Summary:**");
        assert_eq!(parsed.usage.unwrap().completion_tokens, 3);
    }
}
