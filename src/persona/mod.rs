//! Persona Construction
//!
//! ## Flow
//! 1. [`prompt`]: scraped items under a token budget plus the format instructions
//! 2. [`generator`]: model call, then [`parser`] over the continuation
//! 3. [`fallback`]: keyword classifier when the parse is empty
//! 4. [`document`]: rendering and the per-user output file

pub mod document;
pub mod fallback;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod sections;

pub use document::{Persona, PersonaSource, persona_path, write_persona};
pub use fallback::FallbackBuilder;
pub use generator::{GenerationFailure, PersonaGenerator, PersonaOutcome};
pub use parser::parse_sections;
pub use prompt::{Prompt, PromptBuilder};
pub use sections::{PersonaSections, Section, cite};
