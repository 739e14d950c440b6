//! Config Command
//!
//! Manage reddit-persona configuration.
//!
//! Usage:
//!   reddit-persona config show [-f text|toml|json]
//!   reddit-persona config path
//!   reddit-persona config init [-g] [--force]

use crate::config::ConfigLoader;
use crate::types::{PersonaError, Result};

/// Accepted `--format` values; `text` is an alias for `toml`
pub const SHOW_FORMATS: &[&str] = &["text", "toml", "json"];

/// Show the merged effective configuration
pub fn show(format: &str) -> Result<()> {
    match format {
        "text" | "toml" => ConfigLoader::show_config(false),
        "json" => ConfigLoader::show_config(true),
        other => Err(PersonaError::Config(format!(
            "Unknown format '{}'. Valid values: {}",
            other,
            SHOW_FORMATS.join(", ")
        ))),
    }
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a default config file, globally or in the current directory
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::global_config_path().ok_or_else(|| {
            PersonaError::Config("Cannot determine global config directory".to_string())
        })?
    } else {
        ConfigLoader::project_config_path()
    };

    if ConfigLoader::init_at(&path, force)? {
        println!("✓ Initialized configuration");
        println!("  Config: {}", path.display());
    } else {
        println!("Config already exists: {}", path.display());
        println!("Use --force to overwrite.");
    }
    Ok(())
}
