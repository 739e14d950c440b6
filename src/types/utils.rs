//! Shared string helpers for scraped Reddit text.

/// Keep at most `max_chars` characters, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First line with at least one character.
///
/// Whitespace-only lines count as non-empty.
pub fn first_non_empty_line(text: &str) -> Option<&str> {
    text.split('\n').find(|line| !line.is_empty())
}

/// Lower-cased path segment following `/r/` in a Reddit URL.
///
/// Returns an empty string when the URL has no `/r/` segment.
pub fn subreddit_from_url(url: &str) -> String {
    url.split_once("/r/")
        .and_then(|(_, rest)| rest.split('/').next())
        .unwrap_or_default()
        .to_lowercase()
}
