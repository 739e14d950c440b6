//! Persona Document
//!
//! Rendering of the final text and its single write to disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::constants::persona::{LOCATION_PLACEHOLDER, UNKNOWN};
use crate::types::Result;

use super::sections::PersonaSections;

/// Which path produced the sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaSource {
    /// Parsed from model output
    Model,
    /// Built by the keyword classifier after an empty parse
    Fallback,
}

impl std::fmt::Display for PersonaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A generated persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub username: String,
    pub sections: PersonaSections,
    pub source: PersonaSource,
}

impl Persona {
    /// Header block followed by the six sections.
    ///
    /// Demographic fields are never inferred; Location keeps the
    /// instruction text from the prompt.
    pub fn render(&self) -> String {
        format!(
            "u/{name}\n\
             Age: {unknown}\n\
             Occupation: {unknown}\n\
             Status: {unknown}\n\
             Location: {location}\n\
             Tier: {unknown}\n\
             Archetype: {unknown}\n\n\
             {sections}",
            name = self.username,
            unknown = UNKNOWN,
            location = LOCATION_PLACEHOLDER,
            sections = self.sections.render(),
        )
    }
}

/// `<dir>/<username>_persona.txt`
pub fn persona_path(dir: &Path, username: &str) -> PathBuf {
    dir.join(format!("{}_persona.txt", username))
}

/// Write `text` to the user's persona file, replacing any previous one.
///
/// Creates `dir` if needed and returns the written path.
pub fn write_persona(dir: &Path, username: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = persona_path(dir, username);
    fs::write(&path, text)?;
    info!("Persona saved to: {}", path.display());
    Ok(path)
}
