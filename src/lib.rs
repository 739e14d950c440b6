//! reddit-persona - Cited User Personas from Reddit Activity
//!
//! Scrapes a Reddit user's recent submissions and comments, asks a
//! text-continuation model to describe the user, and parses the output into
//! a structured persona where every claim points back to the post or comment
//! it came from.
//!
//! ## Pipeline
//!
//! 1. [`reddit::extract_username`]: profile URL to username
//! 2. [`reddit::scrape_user_data`]: recent posts and comments, degraded on fetch errors
//! 3. [`persona::PersonaGenerator`]: prompt under a token budget, model call, parsing
//! 4. [`persona::FallbackBuilder`]: keyword classifier when parsing finds nothing
//! 5. [`persona::write_persona`]: `<output>/<username>_persona.txt`
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use reddit_persona::{ConfigLoader, PersonaGenerator, RedditClient, ScrapeLimits};
//! use reddit_persona::ai::{PieceTokenizer, create_provider};
//!
//! let config = ConfigLoader::load()?;
//! let reddit = RedditClient::new(&config.reddit)?;
//! let scrape = reddit_persona::scrape_user_data(&reddit, "kojied", ScrapeLimits::default()).await;
//!
//! let provider = create_provider(&config.provider_config())?;
//! let generator = PersonaGenerator::new(provider, Arc::new(PieceTokenizer::new()), &config);
//! let outcome = generator.generate("kojied", &scrape.posts, &scrape.comments).await;
//! reddit_persona::write_persona(&config.output.dir, "kojied", &outcome.render())?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: LLM providers and the prompt tokenizer
//! - [`reddit`]: OAuth client, scraping, profile URL parsing
//! - [`persona`]: prompt, parser, fallback classifier, document output
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod persona;
pub mod reddit;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ApiError, ErrorCategory, PersonaError, Result};
pub use types::ScrapedItem;

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use persona::{
    FallbackBuilder, Persona, PersonaGenerator, PersonaOutcome, PersonaSections, PersonaSource,
    write_persona,
};
pub use reddit::{
    RedditApi, RedditClient, ScrapeLimits, ScrapeOutcome, extract_username, scrape_user_data,
};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, PieceTokenizer, SamplingParams, Tokenizer};
