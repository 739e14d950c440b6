//! Token Counting and Prompt Truncation
//!
//! Provides the tokenizer used to keep prompts inside the model's context
//! window.
//!
//! ## Strategy
//! - Pre-calculate token counts before sending to the LLM
//! - Stop adding content at the first block that would overflow the budget
//! - Truncate the final prompt to the budget as a last guard
//!
//! The default [`PieceTokenizer`] approximates GPT-2 style byte-pair
//! pre-tokenization. Tokens are substrings of the input, so decoding a
//! prefix of the token stream always yields a prefix of the text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::Result;

/// Words, numbers, punctuation runs (each with an optional leading space),
/// English contractions, and whitespace runs.
static PRE_TOKENIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'(?:s|t|re|ve|m|ll|d)| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+")
        .expect("pre-tokenizer pattern is valid")
});

/// Long pieces are split into chunks of this many characters
const MAX_PIECE_CHARS: usize = 8;

/// A single token: the exact slice of text it covers
pub type Token = String;

/// Tokenizer used for prompt budgeting
pub trait Tokenizer: Send + Sync {
    /// Split text into tokens
    fn encode(&self, text: &str) -> Result<Vec<Token>>;

    /// Reassemble text from tokens
    fn decode(&self, tokens: &[Token]) -> Result<String>;

    /// Count tokens in text
    fn count(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }

    /// Encode, keep at most `max_tokens`, decode again.
    ///
    /// Returns the truncated text and its token count.
    fn truncate(&self, text: &str, max_tokens: usize) -> Result<(String, usize)> {
        let mut tokens = self.encode(text)?;
        if tokens.len() > max_tokens {
            debug!(
                "Truncating prompt from {} to {} tokens",
                tokens.len(),
                max_tokens
            );
            tokens.truncate(max_tokens);
        }
        let count = tokens.len();
        Ok((self.decode(&tokens)?, count))
    }
}

/// Regex pre-tokenizer with fixed-width splitting of long pieces
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceTokenizer;

impl PieceTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn push_piece(tokens: &mut Vec<Token>, piece: &str) {
        if piece.chars().count() <= MAX_PIECE_CHARS {
            tokens.push(piece.to_string());
            return;
        }

        let mut start = 0;
        for (n, (idx, _)) in piece.char_indices().enumerate() {
            if n > 0 && n % MAX_PIECE_CHARS == 0 {
                tokens.push(piece[start..idx].to_string());
                start = idx;
            }
        }
        tokens.push(piece[start..].to_string());
    }
}

impl Tokenizer for PieceTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for m in PRE_TOKENIZE.find_iter(text) {
            Self::push_piece(&mut tokens, m.as_str());
        }
        Ok(tokens)
    }

    fn decode(&self, tokens: &[Token]) -> Result<String> {
        Ok(tokens.concat())
    }
}

/// Running token budget for greedy prompt assembly
pub struct TokenBudget<'a> {
    max_tokens: usize,
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> TokenBudget<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, max_tokens: usize) -> Self {
        Self {
            max_tokens,
            tokenizer,
        }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Check if text fits within the budget
    pub fn fits(&self, text: &str) -> Result<bool> {
        let tokens = self.tokenizer.count(text)?;
        if tokens > self.max_tokens {
            debug!(
                "Text of {} tokens exceeds budget of {}",
                tokens, self.max_tokens
            );
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_lossless() {
        let tokenizer = PieceTokenizer::new();
        let text = "Hello, world! I've played 42 games\n\n  of Manor Lords... ünïcödé 🎮";
        let tokens = tokenizer.encode(text).unwrap();
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn test_encode_attaches_leading_space() {
        let tokenizer = PieceTokenizer::new();
        let tokens = tokenizer.encode("the big cat").unwrap();
        assert_eq!(tokens, vec!["the", " big", " cat"]);
    }

    #[test]
    fn test_long_words_are_chunked() {
        let tokenizer = PieceTokenizer::new();
        let tokens = tokenizer.encode("internationalization").unwrap();
        assert_eq!(tokens, vec!["internat", "ionaliza", "tion"]);
    }

    #[test]
    fn test_contractions_split() {
        let tokenizer = PieceTokenizer::new();
        let tokens = tokenizer.encode("don't").unwrap();
        assert_eq!(tokens, vec!["don", "'t"]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = PieceTokenizer::new();
        assert_eq!(tokenizer.count("").unwrap(), 0);
    }

    #[test]
    fn test_truncate_keeps_prefix() {
        let tokenizer = PieceTokenizer::new();
        let text = "a bb cc dd ee";
        let (truncated, count) = tokenizer.truncate(text, 3).unwrap();
        assert_eq!(truncated, "a bb cc");
        assert_eq!(count, 3);

        let (untouched, count) = tokenizer.truncate(text, 100).unwrap();
        assert_eq!(untouched, text);
        assert_eq!(count, 5);
    }

    #[test]
    fn test_budget_fits() {
        let tokenizer = PieceTokenizer::new();
        let budget = TokenBudget::new(&tokenizer, 3);
        assert!(budget.fits("a bb cc").unwrap());
        assert!(!budget.fits("a bb cc dd").unwrap());
        assert_eq!(budget.max_tokens(), 3);
    }
}
