//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/reddit-persona/config.toml)
//! 3. Project config (./reddit-persona.toml)
//! 4. Reddit credentials (REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET)
//! 5. Environment variables (REDDIT_PERSONA_* prefix, `__` separates keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{PersonaError, Result};

/// Environment variable prefix for config overrides
pub const ENV_PREFIX: &str = "REDDIT_PERSONA_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// .env → defaults → global → project → credentials → env vars
    pub fn load() -> Result<Config> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::load_from(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load configuration from explicit global/project file locations
    pub fn load_from(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(project_path));
        }

        // The conventional Reddit app credential names
        if let Ok(client_id) = env::var("REDDIT_CLIENT_ID") {
            figment = figment.merge(Serialized::default("reddit.client_id", client_id));
        }
        if let Ok(client_secret) = env::var("REDDIT_CLIENT_SECRET") {
            figment = figment.merge(Serialized::default("reddit.client_secret", client_secret));
        }

        // e.g. REDDIT_PERSONA_LLM__MODEL -> llm.model
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| PersonaError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/reddit-persona/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("reddit-persona"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("reddit-persona.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| PersonaError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default config to `path`, keeping an existing file unless `force`
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# reddit-persona configuration
# Credentials are best kept in the environment or a .env file:
#   REDDIT_CLIENT_ID=...
#   REDDIT_CLIENT_SECRET=...

version = "1.0"

[reddit]
user_agent = "RedditPersonaBuilder/1.0"
post_limit = 10
comment_limit = 50

[llm]
provider = "ollama"
model = "gpt2"
temperature = 0.7
top_p = 0.9
max_new_tokens = 256
context_window = 1024

# Keyword rules used when the model output has no parseable sections
[classifier]
subreddits = ["manorlords", "chatgpt"]
frustration_keywords = ["issue", "problem", "burned"]
behavior_keywords = ["play", "game"]
motivation_keywords = ["hope", "new"]
personality_keywords = ["incredible", "great"]

[output]
dir = "output"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_from(None, &temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.context_window, 1024);
    }

    #[test]
    fn test_project_overrides_global() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let project = temp_dir.path().join("project.toml");

        fs::write(&global, "[llm]\nmodel = \"global-model\"\nprovider = \"openai\"\n").unwrap();
        fs::write(&project, "[llm]\nmodel = \"project-model\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.llm.model, "project-model");
        assert_eq!(config.llm.provider, "openai");
    }

    #[test]
    fn test_classifier_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project.toml");
        fs::write(&project, "[classifier]\nsubreddits = [\"rust\"]\n").unwrap();

        let config = ConfigLoader::load_from(None, &project).unwrap();
        assert_eq!(config.classifier.subreddits, vec!["rust".to_string()]);
        assert_eq!(config.classifier.behavior_keywords.len(), 2);
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project.toml");
        fs::write(&project, "[llm]\ntemperature = 5.0\n").unwrap();

        let err = ConfigLoader::load_from(None, &project).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_default_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        assert!(ConfigLoader::init_at(&path, false).unwrap());
        assert!(!ConfigLoader::init_at(&path, false).unwrap());
        assert!(ConfigLoader::init_at(&path, true).unwrap());

        let config = ConfigLoader::load_from(None, &path).unwrap();
        assert_eq!(config.classifier, crate::config::ClassifierConfig::default());
        assert_eq!(config.reddit.comment_limit, 50);
    }
}
