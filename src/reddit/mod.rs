//! Reddit Access
//!
//! - [`username`]: profile URL parsing
//! - [`client`]: OAuth client for the user listing endpoints
//! - [`scraper`]: normalization of a user's recent activity

pub mod client;
pub mod scraper;
pub mod username;

pub use client::{Comment, RedditApi, RedditClient, Submission};
pub use scraper::{ScrapeLimits, ScrapeOutcome, scrape_user_data};
pub use username::extract_username;
