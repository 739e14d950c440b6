//! Persona Generator
//!
//! Prompt assembly, model call and parsing, with the keyword classifier as
//! the fallback when the model output has no usable sections.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::{SamplingParams, SharedProvider, Tokenizer};
use crate::config::Config;
use crate::constants::{generation, persona::ERROR_PREFIX};
use crate::types::{PersonaError, Result, ScrapedItem, truncate_chars};

use super::document::{Persona, PersonaSource};
use super::fallback::FallbackBuilder;
use super::parser::parse_sections;
use super::prompt::PromptBuilder;

// =============================================================================
// Outcome Types
// =============================================================================

/// Generation that failed before a persona could be assembled
#[derive(Debug)]
pub struct GenerationFailure {
    pub username: String,
    pub cause: PersonaError,
}

impl GenerationFailure {
    /// `Error generating persona: <cause>`
    pub fn render(&self) -> String {
        format!("{}: {}", ERROR_PREFIX, self.cause)
    }
}

/// Result of one generation run. Both variants render to the persisted text.
#[derive(Debug)]
pub enum PersonaOutcome {
    Generated(Persona),
    Failed(GenerationFailure),
}

impl PersonaOutcome {
    pub fn username(&self) -> &str {
        match self {
            Self::Generated(persona) => &persona.username,
            Self::Failed(failure) => &failure.username,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Generated(persona) => persona.render(),
            Self::Failed(failure) => failure.render(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

// =============================================================================
// Generator
// =============================================================================

/// Builds personas from scraped activity
pub struct PersonaGenerator {
    provider: SharedProvider,
    tokenizer: Arc<dyn Tokenizer>,
    params: SamplingParams,
    prompt_budget: usize,
    fallback: FallbackBuilder,
}

impl PersonaGenerator {
    pub fn new(provider: SharedProvider, tokenizer: Arc<dyn Tokenizer>, config: &Config) -> Self {
        Self {
            provider,
            tokenizer,
            params: config.sampling_params(),
            prompt_budget: config.llm.prompt_budget(),
            fallback: FallbackBuilder::new(&config.classifier),
        }
    }

    /// Generate a persona. Tokenizer and model errors become
    /// [`PersonaOutcome::Failed`]; nothing is returned as `Err`.
    pub async fn generate(
        &self,
        username: &str,
        posts: &[ScrapedItem],
        comments: &[ScrapedItem],
    ) -> PersonaOutcome {
        match self.try_generate(username, posts, comments).await {
            Ok(persona) => PersonaOutcome::Generated(persona),
            Err(cause) => {
                warn!("Persona generation failed for {}: {}", username, cause);
                PersonaOutcome::Failed(GenerationFailure {
                    username: username.to_string(),
                    cause,
                })
            }
        }
    }

    async fn try_generate(
        &self,
        username: &str,
        posts: &[ScrapedItem],
        comments: &[ScrapedItem],
    ) -> Result<Persona> {
        let prompt = PromptBuilder::new(self.tokenizer.as_ref(), self.prompt_budget)
            .build(username, posts, comments)?;
        info!(
            "Prompt includes {} of {} scraped items",
            prompt.included,
            posts.len() + comments.len()
        );

        let (prompt_text, token_count) = self
            .tokenizer
            .truncate(&prompt.text, self.prompt_budget)?;
        debug!(
            "Token count: {}, Prompt preview: {}...",
            token_count,
            truncate_chars(&prompt_text, generation::PROMPT_PREVIEW_CHARS)
        );

        let response = self.provider.generate(&prompt_text, &self.params).await?;
        info!(
            "{} ({}) finished in {}ms: {}",
            self.provider.name(),
            self.provider.model(),
            response.elapsed.as_millis(),
            response.usage
        );

        let parsed = parse_sections(&response.text);
        let (sections, source) = if parsed.is_empty() {
            warn!("No persona sections in model output, using keyword fallback");
            (self.fallback.build(posts, comments), PersonaSource::Fallback)
        } else {
            (parsed, PersonaSource::Model)
        };

        Ok(Persona {
            username: username.to_string(),
            sections,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{LlmProvider, LlmResponse, PieceTokenizer};
    use crate::persona::write_persona;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const MANOR_URL: &str = "https://www.reddit.com/r/ManorLords/comments/abc/x/c1/";

    /// Returns a canned continuation and records the prompts it saw
    struct MockProvider {
        output: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                output: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                output: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn generate(&self, prompt: &str, _params: &SamplingParams) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.output {
                Ok(text) => Ok(LlmResponse::text_only(text.clone())),
                Err(message) => Err(PersonaError::llm(message.clone())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn generator(provider: Arc<MockProvider>) -> PersonaGenerator {
        PersonaGenerator::new(provider, Arc::new(PieceTokenizer::new()), &Config::default())
    }

    fn comments() -> Vec<ScrapedItem> {
        vec![ScrapedItem::new("this is a great new feature", MANOR_URL)]
    }

    #[tokio::test]
    async fn test_parsed_output_is_used() {
        let provider = MockProvider::replying(
            "**Summary:**\nEnjoys city builders.\n\n**Motivations:**\nCitation: https://m\n* Wants new content",
        );
        let outcome = generator(provider).generate("kojied", &[], &comments()).await;

        let PersonaOutcome::Generated(persona) = outcome else {
            panic!("expected a generated persona");
        };
        assert_eq!(persona.source, PersonaSource::Model);
        assert_eq!(persona.sections.summary, vec!["Enjoys city builders."]);
        assert_eq!(
            persona.sections.motivations,
            vec!["* Wants new content  * Citation: https://m"]
        );
    }

    #[tokio::test]
    async fn test_empty_parse_uses_fallback() {
        let provider = MockProvider::replying("I am a language model and I like trains.");
        let outcome = generator(provider).generate("kojied", &[], &comments()).await;

        let PersonaOutcome::Generated(persona) = outcome else {
            panic!("expected a generated persona");
        };
        assert_eq!(persona.source, PersonaSource::Fallback);
        assert_eq!(
            persona.sections,
            FallbackBuilder::default().build(&[], &comments())
        );
    }

    #[tokio::test]
    async fn test_model_failure_renders_error() {
        let provider = MockProvider::failing("connection refused");
        let outcome = generator(provider).generate("kojied", &[], &comments()).await;

        assert!(!outcome.is_generated());
        assert_eq!(outcome.username(), "kojied");
        let text = outcome.render();
        assert!(text.starts_with("Error generating persona: "), "{}", text);
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_prompt_is_truncated_to_budget() {
        let provider = MockProvider::replying("");
        let long_comments: Vec<ScrapedItem> = (0..100)
            .map(|i| ScrapedItem::new(format!("comment number {} about the game", i), MANOR_URL))
            .collect();

        generator(provider.clone())
            .generate("kojied", &[], &long_comments)
            .await;

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let tokens = PieceTokenizer::new().count(&prompts[0]).unwrap();
        assert!(tokens <= Config::default().llm.prompt_budget());
        assert!(prompts[0].starts_with("Reddit user u/kojied has posted"));
    }

    #[tokio::test]
    async fn test_identical_runs_write_identical_files() {
        let temp_dir = TempDir::new().unwrap();
        let reply = "**Personality:**\nCitation: https://p\n* Curious\nUser Quote: 'wow'";

        let mut contents = Vec::new();
        for _ in 0..2 {
            let outcome = generator(MockProvider::replying(reply))
                .generate("kojied", &[], &comments())
                .await;
            let path = write_persona(temp_dir.path(), outcome.username(), &outcome.render()).unwrap();
            contents.push(std::fs::read(path).unwrap());
        }
        assert_eq!(contents[0], contents[1]);
    }
}
