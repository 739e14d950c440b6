//! Styled terminal status lines

use std::path::Path;

use console::style;

use crate::persona::{PersonaOutcome, PersonaSource};
use crate::reddit::ScrapeOutcome;

pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Always shown, on stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold().underlined());
        }
    }

    /// Counts of scraped items, plus the cause when a fetch failed
    pub fn scrape_summary(&self, username: &str, scrape: &ScrapeOutcome) {
        let counts = format!(
            "Scraped {} posts and {} comments for u/{}",
            scrape.posts.len(),
            scrape.comments.len(),
            username
        );
        match &scrape.error {
            None => self.success(&counts),
            Some(e) => {
                self.warning(&counts);
                self.warning(&format!("Scraping stopped early: {}", e));
            }
        }
    }

    /// Where the persona went and how it was produced
    pub fn persona_saved(&self, outcome: &PersonaOutcome, path: &Path) {
        match outcome {
            PersonaOutcome::Generated(persona) => {
                if persona.source == PersonaSource::Fallback {
                    self.warning("Model output had no persona sections; used keyword fallback");
                }
                self.success(&format!("Persona saved to: {}", path.display()));
            }
            PersonaOutcome::Failed(failure) => {
                self.error(&failure.render());
                self.warning(&format!("Error report saved to: {}", path.display()));
            }
        }
    }
}
