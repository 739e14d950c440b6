//! Scraped Reddit content

use serde::{Deserialize, Serialize};

use crate::constants::persona::NO_CITATION;

/// One post or comment, normalized to its text and the URL that cites it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    pub text: String,
    /// Citation source for claims derived from `text`
    pub url: String,
}

impl ScrapedItem {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: text.into(),
            url: if url.trim().is_empty() {
                NO_CITATION.to_string()
            } else {
                url
            },
        }
    }
}
