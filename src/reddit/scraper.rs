//! User Activity Scraper
//!
//! Fetches a user's recent submissions and comments and normalizes them into
//! [`ScrapedItem`]s. Fetch failures never escape: the outcome carries
//! whatever was collected plus the error that stopped collection.

use tracing::{info, warn};

use super::client::{Comment, RedditApi, Submission};
use crate::constants::reddit;
use crate::types::{PersonaError, ScrapedItem, truncate_chars};

/// How many items to request per listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeLimits {
    pub posts: u32,
    pub comments: u32,
}

impl Default for ScrapeLimits {
    fn default() -> Self {
        Self {
            posts: reddit::DEFAULT_POST_LIMIT,
            comments: reddit::DEFAULT_COMMENT_LIMIT,
        }
    }
}

/// Result of scraping one user
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub posts: Vec<ScrapedItem>,
    pub comments: Vec<ScrapedItem>,
    /// Set when a fetch failed; `posts`/`comments` hold what came before it
    pub error: Option<PersonaError>,
}

impl ScrapeOutcome {
    /// True if every fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Posts followed by comments
    pub fn items(&self) -> impl Iterator<Item = &ScrapedItem> {
        self.posts.iter().chain(self.comments.iter())
    }
}

impl From<Submission> for ScrapedItem {
    fn from(submission: Submission) -> Self {
        let text = format!(
            "{}\n{}",
            submission.title,
            submission.selftext.unwrap_or_default()
        );
        let url = match submission.url {
            Some(url) if !url.is_empty() => url,
            _ if !submission.permalink.is_empty() => {
                format!("{}{}", reddit::WEB_BASE, submission.permalink)
            }
            _ => String::new(),
        };
        ScrapedItem::new(text, url)
    }
}

impl From<Comment> for ScrapedItem {
    fn from(comment: Comment) -> Self {
        ScrapedItem::new(
            comment.body,
            format!("{}{}", reddit::WEB_BASE, comment.permalink),
        )
    }
}

/// Scrape a user's recent posts and comments.
///
/// Submissions are fetched before comments; an error in either fetch is
/// logged and returned in [`ScrapeOutcome::error`].
pub async fn scrape_user_data(
    api: &dyn RedditApi,
    username: &str,
    limits: ScrapeLimits,
) -> ScrapeOutcome {
    let mut outcome = ScrapeOutcome::default();

    if let Err(e) = collect(api, username, limits, &mut outcome).await {
        warn!("Error scraping data for {}: {}", username, e);
        outcome.error = Some(e);
    }

    info!(
        "Scraped {} posts and {} comments for {}",
        outcome.posts.len(),
        outcome.comments.len(),
        username
    );
    for comment in outcome.comments.iter().take(reddit::COMMENT_PREVIEW_COUNT) {
        info!(
            "Comment: {}... URL: {}",
            truncate_chars(&comment.text, reddit::COMMENT_PREVIEW_CHARS),
            comment.url
        );
    }

    outcome
}

async fn collect(
    api: &dyn RedditApi,
    username: &str,
    limits: ScrapeLimits,
    outcome: &mut ScrapeOutcome,
) -> crate::types::Result<()> {
    let submissions = api.submissions(username, limits.posts).await?;
    outcome.posts.extend(
        submissions
            .into_iter()
            .take(limits.posts as usize)
            .map(ScrapedItem::from),
    );

    let comments = api.comments(username, limits.comments).await?;
    outcome.comments.extend(
        comments
            .into_iter()
            .take(limits.comments as usize)
            .map(ScrapedItem::from),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::persona::NO_CITATION;
    use crate::types::{ErrorCategory, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct MockReddit {
        submissions: Vec<Submission>,
        comments: Vec<Comment>,
        fail_submissions: bool,
        fail_comments: bool,
        calls: AtomicU32,
    }

    impl MockReddit {
        fn with_counts(posts: usize, comments: usize) -> Self {
            Self {
                submissions: (0..posts)
                    .map(|i| Submission {
                        title: format!("Post {}", i),
                        selftext: if i % 2 == 0 {
                            Some(format!("Body {}", i))
                        } else {
                            None
                        },
                        url: Some(format!(
                            "https://www.reddit.com/r/ManorLords/comments/p{}/post/",
                            i
                        )),
                        permalink: format!("/r/ManorLords/comments/p{}/post/", i),
                    })
                    .collect(),
                comments: (0..comments)
                    .map(|i| Comment {
                        body: format!("Comment body {}", i),
                        permalink: format!("/r/ChatGPT/comments/x/y/c{}/", i),
                    })
                    .collect(),
                fail_submissions: false,
                fail_comments: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_submissions: true,
                ..Self::with_counts(3, 3)
            }
        }
    }

    #[async_trait]
    impl RedditApi for MockReddit {
        async fn submissions(&self, _username: &str, limit: u32) -> Result<Vec<Submission>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_submissions {
                return Err(PersonaError::reddit(ErrorCategory::NotFound, "404 Not Found"));
            }
            Ok(self.submissions.iter().take(limit as usize).cloned().collect())
        }

        async fn comments(&self, _username: &str, limit: u32) -> Result<Vec<Comment>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_comments {
                return Err(PersonaError::reddit(ErrorCategory::RateLimit, "429"));
            }
            Ok(self.comments.iter().take(limit as usize).cloned().collect())
        }
    }

    #[tokio::test]
    async fn test_counts_match_client() {
        let api = MockReddit::with_counts(4, 7);
        let outcome = scrape_user_data(&api, "kojied", ScrapeLimits::default()).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.posts.len(), 4);
        assert_eq!(outcome.comments.len(), 7);
        assert!(outcome.items().all(|item| !item.url.is_empty()));
    }

    #[tokio::test]
    async fn test_limits_are_respected() {
        let api = MockReddit::with_counts(15, 80);
        let outcome = scrape_user_data(&api, "kojied", ScrapeLimits::default()).await;

        assert_eq!(outcome.posts.len(), 10);
        assert_eq!(outcome.comments.len(), 50);
    }

    #[tokio::test]
    async fn test_submission_normalization() {
        let api = MockReddit::with_counts(2, 1);
        let outcome = scrape_user_data(&api, "kojied", ScrapeLimits::default()).await;

        assert_eq!(outcome.posts[0].text, "Post 0\nBody 0");
        assert_eq!(outcome.posts[1].text, "Post 1\n");
        assert_eq!(
            outcome.posts[0].url,
            "https://www.reddit.com/r/ManorLords/comments/p0/post/"
        );
        assert_eq!(outcome.comments[0].text, "Comment body 0");
        assert_eq!(
            outcome.comments[0].url,
            "https://www.reddit.com/r/ChatGPT/comments/x/y/c0/"
        );
    }

    #[tokio::test]
    async fn test_error_on_first_call_returns_empty() {
        let api = MockReddit::failing();
        let outcome = scrape_user_data(&api, "ghost", ScrapeLimits::default()).await;

        assert!(outcome.posts.is_empty());
        assert!(outcome.comments.is_empty());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        let error = outcome.error.expect("error should be reported");
        assert_eq!(error.category(), Some(ErrorCategory::NotFound));
    }

    #[tokio::test]
    async fn test_comment_failure_keeps_posts() {
        let api = MockReddit {
            fail_comments: true,
            ..MockReddit::with_counts(3, 5)
        };
        let outcome = scrape_user_data(&api, "kojied", ScrapeLimits::default()).await;

        assert_eq!(outcome.posts.len(), 3);
        assert!(outcome.comments.is_empty());
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_submission_url_falls_back_to_permalink() {
        let item = ScrapedItem::from(Submission {
            title: "t".to_string(),
            selftext: None,
            url: None,
            permalink: "/r/rust/comments/a/b/".to_string(),
        });
        assert_eq!(item.url, "https://www.reddit.com/r/rust/comments/a/b/");

        let item = ScrapedItem::from(Submission {
            title: "t".to_string(),
            ..Default::default()
        });
        assert_eq!(item.url, NO_CITATION);
    }
}
