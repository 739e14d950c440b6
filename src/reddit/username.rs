//! Profile URL parsing

use crate::types::{PersonaError, Result};

const USER_MARKER: &str = "/user/";

/// Extract the username from a Reddit profile URL.
///
/// Returns the text between the first `/user/` and the following `/` (or
/// the end of the URL). Anything else about the URL goes unchecked.
pub fn extract_username(url: &str) -> Result<String> {
    let (_, rest) = url
        .split_once(USER_MARKER)
        .ok_or_else(|| PersonaError::InvalidProfileUrl {
            url: url.to_string(),
        })?;

    Ok(rest.split('/').next().unwrap_or_default().to_string())
}
