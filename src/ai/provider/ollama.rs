//! Ollama Backend
//!
//! `POST /api/generate` with `raw: true`, so the prompt is continued
//! verbatim without the model's chat template.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{LlmProvider, LlmResponse, ProviderConfig, SamplingParams, TokenUsage, http_utils};
use crate::types::{PersonaError, Result};

const DEFAULT_API_BASE: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "gpt2";
const SERVICE: &str = "ollama";

pub struct OllamaProvider {
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_base = http_utils::validate_endpoint(
            config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            SERVICE,
            true,
        )?;

        Ok(Self {
            api_base,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client: http_utils::build_client(config.timeout_secs, SERVICE)?,
        })
    }

    fn request<'a>(&'a self, prompt: &'a str, params: &SamplingParams) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            raw: true,
            options: GenerateOptions {
                temperature: params.temperature,
                top_p: params.top_p,
                num_predict: params.max_new_tokens,
            },
        }
    }

    /// Tag names match with or without the `:latest` suffix
    fn serves_model(&self, tags: &TagsResponse) -> bool {
        let wanted = self.model.trim_end_matches(":latest");
        tags.models
            .iter()
            .any(|m| m.name == self.model || m.name.trim_end_matches(":latest") == wanted)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<LlmResponse> {
        info!(
            "Generating with Ollama (model: {}, temperature: {}, top_p: {})",
            self.model, params.temperature, params.top_p
        );

        let url = format!("{}/api/generate", self.api_base);
        debug!("POST {}", url);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(&self.request(prompt, params))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    warn!(
                        "Cannot reach Ollama at {}. Start it with: ollama serve",
                        self.api_base
                    );
                }
                http_utils::request_error(e, SERVICE)
            })?;

        if !response.status().is_success() {
            return Err(http_utils::status_error(response, SERVICE).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| http_utils::request_error(e, SERVICE))?;

        if body.response.trim().is_empty() {
            warn!("Ollama returned an empty continuation");
        }

        Ok(LlmResponse {
            text: body.response,
            usage: TokenUsage {
                prompt_tokens: body.prompt_eval_count,
                completion_tokens: body.eval_count,
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
        let url = format!("{}/api/tags", self.api_base);

        let response = match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                warn!("Ollama tag listing failed: {}", resp.status());
                return Ok(false);
            }
            Err(e) => {
                warn!("Ollama not reachable: {}", e);
                return Ok(false);
            }
        };

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| PersonaError::llm(format!("Invalid Ollama tags response: {}", e)))?;

        let available = self.serves_model(&tags);
        if !available {
            warn!(
                "Ollama does not have model '{}'. Pull it with: ollama pull {}",
                self.model, self.model
            );
        }
        Ok(available)
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    raw: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}
