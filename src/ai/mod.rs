//! AI Integration Layer
//!
//! LLM backends for text continuation and the tokenizer used to budget
//! prompts.

pub mod provider;
pub mod tokenizer;

pub use provider::{
    LlmProvider, LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig, SUPPORTED_PROVIDERS,
    SamplingParams, SharedProvider, TokenUsage, create_provider,
};
pub use tokenizer::{PieceTokenizer, Token, TokenBudget, Tokenizer};
