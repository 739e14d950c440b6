//! Prompt Construction
//!
//! Scraped items are added in order while the prompt stays inside the token
//! budget; the first item that would overflow it ends the data section.

use tracing::debug;

use crate::ai::{TokenBudget, Tokenizer};
use crate::types::{Result, ScrapedItem};

const SEPARATOR_WIDTH: usize = 40;
const NO_DATA_NOTICE: &str = "No user activity data available within token limit.\n";

/// Assembled prompt text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    /// Scraped items that made it into the prompt
    pub included: usize,
}

/// Builds generation prompts under a token budget
pub struct PromptBuilder<'a> {
    budget: TokenBudget<'a>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, max_tokens: usize) -> Self {
        Self {
            budget: TokenBudget::new(tokenizer, max_tokens),
        }
    }

    pub fn build(
        &self,
        username: &str,
        posts: &[ScrapedItem],
        comments: &[ScrapedItem],
    ) -> Result<Prompt> {
        let mut text = format!(
            "Reddit user u/{} has posted and commented the following:\n{}\n",
            username,
            "-".repeat(SEPARATOR_WIDTH)
        );
        let mut included = 0;

        for item in posts
            .iter()
            .chain(comments)
            .filter(|item| !item.text.trim().is_empty())
        {
            let candidate = format!("{}{}\nCitation: {}\n", text, item.text, item.url);
            if !self.budget.fits(&candidate)? {
                debug!(
                    "Token budget of {} reached after {} items",
                    self.budget.max_tokens(),
                    included
                );
                break;
            }
            text = candidate;
            included += 1;
        }

        if included == 0 {
            text.push_str(NO_DATA_NOTICE);
        }
        text.push_str(&instructions(username));

        Ok(Prompt { text, included })
    }
}

fn instructions(username: &str) -> String {
    format!(
        r#"
Based on the above, create a detailed user persona in the following structured format:
Header: u/{username}
Age: [Estimate based on context, or 'Unknown']
Occupation: [Guess based on context, or 'Unknown']
Status: [e.g., Single, Married, or 'Unknown']
Location: [Infer from subreddits or context, or 'Unknown']
Tier: [e.g., Early Adopter, Mainstream, or 'Unknown']
Archetype: [e.g., The Creator, The Explorer, or 'Unknown']

**Summary:**
* A brief, one-paragraph overview of the user’s general disposition and main focus based on their activity.
Example: * User is a tech enthusiast who frequently shares coding tips.

**Behavior & Habits:**
* [List specific behaviors or habits observed, e.g., 'Frequently discusses local issues']  * Citation: [URL]
Example: * Regularly posts about gaming strategies  * Citation: https://example.com

**Frustrations:**
* [List specific frustrations, e.g., 'Dealing with police bribery']  * Citation: [URL]
Example: * Frustrated with slow internet speeds  * Citation: https://example.com

**Motivations:**
* [List motivations, e.g., 'Seeking healthy food options']  * Citation: [URL]
Example: * Motivated to learn new skills  * Citation: https://example.com

**Goals & Needs:**
* [List goals and needs, e.g., 'To improve food quality awareness']  * Citation: [URL]
Example: * Aims to build a personal website  * Citation: https://example.com

**Personality:**
* [Assess personality traits, e.g., 'Introvert vs. Extrovert', 'Sensing vs. Intuition', etc., using a scale or binary choice]  * Citation: [URL]
* User Quote: [A direct quote from their posts/comments that reflects their personality]  * Citation: [URL]
Example: * [Introvert vs. Extrovert: Extrovert - enjoys community discussions]  * Citation: https://example.com
* User Quote: 'I love chatting with others!'  * Citation: https://example.com

For **EVERY characteristic** under Behavior & Habits, Frustrations, Motivations, Goals & Needs, and Personality, you **MUST** include the specific 'Citation' URL from the data that supports it. Base all conclusions strictly on the provided data. Do not invent information beyond the examples."#
    )
}
