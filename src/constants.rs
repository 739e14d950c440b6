//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Reddit API constants
pub mod reddit {
    /// OAuth token endpoint (client-credentials grant)
    pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

    /// Base URL for authenticated API reads
    pub const OAUTH_API_BASE: &str = "https://oauth.reddit.com";

    /// Prefix for comment permalinks, which the API returns as paths
    pub const WEB_BASE: &str = "https://www.reddit.com";

    /// Default User-Agent sent with every request
    pub const DEFAULT_USER_AGENT: &str = "RedditPersonaBuilder/1.0";

    /// Most recent submissions fetched per user
    pub const DEFAULT_POST_LIMIT: u32 = 10;

    /// Most recent comments fetched per user
    pub const DEFAULT_COMMENT_LIMIT: u32 = 50;

    /// Largest page size the listing endpoints accept
    pub const MAX_LISTING_LIMIT: u32 = 100;

    /// Comments echoed to the log after scraping
    pub const COMMENT_PREVIEW_COUNT: usize = 5;

    /// Characters of each previewed comment
    pub const COMMENT_PREVIEW_CHARS: usize = 50;
}

/// Generation constants
pub mod generation {
    /// Model context window in tokens
    pub const CONTEXT_WINDOW: usize = 1024;

    /// Tokens reserved for the generated continuation
    pub const MAX_NEW_TOKENS: usize = 256;

    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;

    /// Nucleus sampling cutoff
    pub const TOP_P: f32 = 0.9;

    /// Characters of the final prompt echoed at debug level
    pub const PROMPT_PREVIEW_CHARS: usize = 200;
}

/// Persona document constants
pub mod persona {
    /// Citation used when no source URL is known
    pub const NO_CITATION: &str = "No citation available";

    /// Value for header fields the pipeline never infers
    pub const UNKNOWN: &str = "Unknown";

    /// Location header value. Left as the prompt's instruction text.
    pub const LOCATION_PLACEHOLDER: &str = "[Infer from subreddits or context, or 'Unknown']";

    /// Maximum characters of a fallback user quote
    pub const QUOTE_MAX_CHARS: usize = 50;

    /// Prefix of the document written when generation fails
    pub const ERROR_PREFIX: &str = "Error generating persona";
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
