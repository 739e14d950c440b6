//! Generate Command
//!
//! Scrape a Reddit user and write their persona.
//!
//! Usage:
//!   reddit-persona generate [--url URL] [--provider NAME] [--model NAME] [--output DIR]

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::ai::{PieceTokenizer, create_provider};
use crate::cli::Output;
use crate::config::{Config, ConfigLoader};
use crate::persona::{PersonaGenerator, PersonaOutcome, write_persona};
use crate::reddit::{RedditClient, ScrapeLimits, extract_username, scrape_user_data};
use crate::types::{PersonaError, Result};

/// Generate run options
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Profile URL; prompted for when absent
    pub url: Option<String>,
    /// LLM provider override
    pub provider: Option<String>,
    /// Model override
    pub model: Option<String>,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// Suppress status lines
    pub quiet: bool,
}

/// Run persona generation for one user
pub fn run(options: GenerateOptions) -> Result<()> {
    let output = Output::new(options.quiet);

    let mut config = ConfigLoader::load()?;
    apply_overrides(&mut config, &options);
    config.validate()?;

    let url = match options.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };
    let username = extract_username(url.trim())?;
    output.header(&format!("Building persona for u/{}", username));

    let rt = Runtime::new()?;
    let outcome = rt.block_on(build_persona(&config, &username, &output))?;

    let path = write_persona(&config.output.dir, outcome.username(), &outcome.render())?;
    output.persona_saved(&outcome, &path);

    Ok(())
}

fn apply_overrides(config: &mut Config, options: &GenerateOptions) {
    if let Some(provider) = &options.provider {
        config.llm.provider = provider.clone();
    }
    if let Some(model) = &options.model {
        config.llm.model = model.clone();
    }
    if let Some(dir) = &options.output {
        config.output.dir = dir.clone();
    }
}

fn prompt_for_url() -> Result<String> {
    print!("Enter Reddit profile URL (e.g., https://www.reddit.com/user/kojied/): ");
    std::io::stdout().flush()?;
    read_url(std::io::stdin().lock())
}

/// First line of `input`, trimmed; works for a terminal or a pipe
fn read_url(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let url = line.trim();
    if url.is_empty() {
        return Err(PersonaError::Config("No profile URL given".to_string()));
    }
    Ok(url.to_string())
}

async fn build_persona(config: &Config, username: &str, output: &Output) -> Result<PersonaOutcome> {
    let reddit = RedditClient::new(&config.reddit)?;
    let provider = create_provider(&config.provider_config())?;

    match provider.health_check().await {
        Ok(true) => info!("{} provider is reachable", provider.name()),
        Ok(false) => warn!("{} provider did not pass its health check", provider.name()),
        Err(e) => warn!("{} health check failed: {}", provider.name(), e),
    }

    let limits = ScrapeLimits {
        posts: config.reddit.post_limit,
        comments: config.reddit.comment_limit,
    };
    let scrape = scrape_user_data(&reddit, username, limits).await;
    output.scrape_summary(username, &scrape);

    let generator = PersonaGenerator::new(provider, Arc::new(PieceTokenizer::new()), config);
    Ok(generator
        .generate(username, &scrape.posts, &scrape.comments)
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let options = GenerateOptions {
            provider: Some("openai".to_string()),
            model: Some("gpt-3.5-turbo-instruct".to_string()),
            output: Some(PathBuf::from("personas")),
            ..Default::default()
        };
        apply_overrides(&mut config, &options);

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-3.5-turbo-instruct");
        assert_eq!(config.output.dir, PathBuf::from("personas"));
    }

    #[test]
    fn test_read_url_from_piped_input() {
        let input = std::io::Cursor::new("https://www.reddit.com/user/kojied/\n");
        let url = read_url(input).unwrap();
        assert_eq!(url, "https://www.reddit.com/user/kojied/");
        assert_eq!(extract_username(&url).unwrap(), "kojied");
    }

    #[test]
    fn test_read_url_empty_input() {
        let err = read_url(std::io::Cursor::new("")).unwrap_err();
        assert!(matches!(err, PersonaError::Config(_)));

        let err = read_url(std::io::Cursor::new("   \n")).unwrap_err();
        assert!(matches!(err, PersonaError::Config(_)));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &GenerateOptions::default());
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }
}
