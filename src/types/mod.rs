pub mod error;
pub mod item;
pub mod utils;

pub use error::{ApiError, ErrorCategory, ErrorClassifier, PersonaError, Result};
pub use item::ScrapedItem;
pub use utils::{first_non_empty_line, subreddit_from_url, truncate_chars};
