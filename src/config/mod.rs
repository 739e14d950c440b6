//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/reddit-persona/config.toml)
//! 3. Project config (./reddit-persona.toml)
//! 4. Environment variables (REDDIT_CLIENT_*, REDDIT_PERSONA_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::{ConfigLoader, ENV_PREFIX};
pub use types::*;
