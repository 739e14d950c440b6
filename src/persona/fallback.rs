//! Fallback Persona Builder
//!
//! Deterministic keyword classifier used when the model output yields no
//! parseable sections. Only items posted in allow-listed subreddits are
//! classified; each rule is checked independently, so one item can feed
//! several sections.

use crate::config::ClassifierConfig;
use crate::constants::persona::{NO_CITATION, QUOTE_MAX_CHARS};
use crate::types::{ScrapedItem, first_non_empty_line, subreddit_from_url, truncate_chars};

use super::sections::{PersonaSections, Section, cite};

// =============================================================================
// Fixed Claims
// =============================================================================

const SUMMARY: &str = "* User is an active commenter, primarily engaged in gaming-related discussions on subreddits like r/ManorLords.";
const FRUSTRATION: &str = "* Frustrated with game mechanics or bugs";
const BEHAVIOR: &str = "* Regularly plays and discusses video games";
const MOTIVATION: &str = "* Motivated to see game improvements";
const GOAL: &str = "* Aims to enhance gaming experience with new features";
const PERSONALITY: &str =
    "* [Introvert vs. Extrovert: Leans Extrovert - enthusiastic and supportive]";
const NO_QUOTE: &str = "No quote available";

const NO_BEHAVIOR: &str = "* No specific behaviors identified.";
const NO_FRUSTRATION: &str = "* No frustrations identified.";
const NO_MOTIVATION: &str = "* No motivations identified.";
const NO_GOAL: &str = "* No goals identified.";
const NO_PERSONALITY: &str = "* No personality traits identified.";
const NO_QUOTE_ENTRY: &str = "* User Quote: No quote available.";

/// Keyword rules compiled from [`ClassifierConfig`]
#[derive(Debug, Clone)]
pub struct FallbackBuilder {
    subreddits: Vec<String>,
    frustration: Vec<String>,
    behavior: Vec<String>,
    motivation: Vec<String>,
    personality: Vec<String>,
}

fn lowercased(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

impl FallbackBuilder {
    pub fn new(rules: &ClassifierConfig) -> Self {
        Self {
            subreddits: lowercased(&rules.subreddits),
            frustration: lowercased(&rules.frustration_keywords),
            behavior: lowercased(&rules.behavior_keywords),
            motivation: lowercased(&rules.motivation_keywords),
            personality: lowercased(&rules.personality_keywords),
        }
    }

    /// Classify posts followed by comments into the six sections.
    ///
    /// Sections left empty receive a placeholder entry.
    pub fn build(&self, posts: &[ScrapedItem], comments: &[ScrapedItem]) -> PersonaSections {
        let mut sections = PersonaSections::default();
        sections.push(Section::Summary, SUMMARY);

        for item in posts.iter().chain(comments) {
            self.classify(item, &mut sections);
        }

        fill_placeholders(&mut sections);
        sections
    }

    fn classify(&self, item: &ScrapedItem, sections: &mut PersonaSections) {
        let subreddit = subreddit_from_url(&item.url);
        if !self.subreddits.contains(&subreddit) {
            return;
        }

        let text = item.text.to_lowercase();
        let url = item.url.as_str();

        if contains_any(&text, &self.frustration) {
            sections.push(Section::Frustrations, cite(FRUSTRATION, url));
        }
        if contains_any(&text, &self.behavior) {
            sections.push(Section::Behavior, cite(BEHAVIOR, url));
        }
        if contains_any(&text, &self.motivation) {
            sections.push(Section::Motivations, cite(MOTIVATION, url));
            sections.push(Section::Goals, cite(GOAL, url));
        }
        if contains_any(&text, &self.personality) {
            sections.push(Section::Personality, cite(PERSONALITY, url));
            let quote = first_non_empty_line(&item.text).unwrap_or(NO_QUOTE);
            let claim = format!("* User Quote: {}...", truncate_chars(quote, QUOTE_MAX_CHARS));
            sections.push(Section::Personality, cite(&claim, url));
        }
    }
}

impl Default for FallbackBuilder {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

fn fill_placeholders(sections: &mut PersonaSections) {
    for (section, placeholders) in [
        (Section::Behavior, &[NO_BEHAVIOR][..]),
        (Section::Frustrations, &[NO_FRUSTRATION][..]),
        (Section::Motivations, &[NO_MOTIVATION][..]),
        (Section::Goals, &[NO_GOAL][..]),
        (Section::Personality, &[NO_PERSONALITY, NO_QUOTE_ENTRY][..]),
    ] {
        if sections.entries(section).is_empty() {
            for placeholder in placeholders {
                sections.push(section, cite(placeholder, NO_CITATION));
            }
        }
    }
}
