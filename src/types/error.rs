//! Error Types
//!
//! [`PersonaError`] is the crate-wide error. Failures of Reddit or an LLM
//! backend carry an [`ApiError`] whose [`ErrorCategory`] says what went
//! wrong (rate limit, bad credentials, unknown user, ...). Nothing retries;
//! the category only feeds logs and degraded outcomes.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Classification of failures reported by external services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    RateLimit,
    Auth,
    NotFound,
    Network,
    Unavailable,
    BadRequest,
    ParseError,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::Auth => "AUTH",
            Self::NotFound => "NOT_FOUND",
            Self::Network => "NETWORK",
            Self::Unavailable => "UNAVAILABLE",
            Self::BadRequest => "BAD_REQUEST",
            Self::ParseError => "PARSE_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Failure of a call to an external service (Reddit or an LLM backend)
#[derive(Debug, Clone)]
pub struct ApiError {
    pub category: ErrorCategory,
    pub message: String,
    /// "reddit", "ollama", "openai"
    pub service: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.service {
            Some(service) => write!(f, "[{}:{}] {}", service, self.category, self.message),
            None => write!(f, "[{}] {}", self.category, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            service: None,
        }
    }

    /// Create error with service context
    pub fn with_service(
        category: ErrorCategory,
        message: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            service: Some(service.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport-level failures onto [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code
    pub fn classify_http_status(status: u16, message: &str, service: &str) -> ApiError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            404 => ErrorCategory::NotFound,
            400 | 422 => ErrorCategory::BadRequest,
            500..=599 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        ApiError::with_service(category, message, service)
    }

    /// Classify a reqwest transport error
    pub fn classify_request(err: &reqwest::Error, service: &str) -> ApiError {
        if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &err.to_string(), service);
        }

        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() || err.is_body() {
            ErrorCategory::ParseError
        } else if err.is_builder() {
            ErrorCategory::BadRequest
        } else {
            ErrorCategory::Unknown
        };
        ApiError::with_service(category, err.to_string(), service)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum PersonaError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Reddit API error: {0}")]
    Reddit(ApiError),

    #[error("LLM error: {0}")]
    Llm(ApiError),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Invalid profile URL '{url}': expected a '/user/<name>' segment")]
    InvalidProfileUrl { url: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PersonaError>;

impl PersonaError {
    /// Reddit error with a category, tagged with the "reddit" service
    pub fn reddit(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Reddit(ApiError::with_service(category, message, "reddit"))
    }

    /// LLM error from a plain message
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(ApiError::new(ErrorCategory::Unknown, message))
    }

    /// Category of the underlying collaborator failure, if any
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Reddit(e) | Self::Llm(e) => Some(e.category),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
    }

    #[test]
    fn test_classify_http_status() {
        let rate_limit = ErrorClassifier::classify_http_status(429, "Too many requests", "reddit");
        assert_eq!(rate_limit.category, ErrorCategory::RateLimit);

        let auth = ErrorClassifier::classify_http_status(401, "Unauthorized", "reddit");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let missing = ErrorClassifier::classify_http_status(404, "Not Found", "reddit");
        assert_eq!(missing.category, ErrorCategory::NotFound);

        let server_error = ErrorClassifier::classify_http_status(503, "Busy", "ollama");
        assert_eq!(server_error.category, ErrorCategory::Unavailable);

        let odd = ErrorClassifier::classify_http_status(418, "Teapot", "ollama");
        assert_eq!(odd.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::with_service(ErrorCategory::RateLimit, "Too many requests", "reddit");
        assert_eq!(err.to_string(), "[reddit:RATE_LIMIT] Too many requests");

        let err_no_service = ApiError::new(ErrorCategory::Network, "Connection failed");
        assert_eq!(err_no_service.to_string(), "[NETWORK] Connection failed");
    }

    #[test]
    fn test_persona_error_category() {
        let err = PersonaError::reddit(ErrorCategory::NotFound, "no such user");
        assert_eq!(err.category(), Some(ErrorCategory::NotFound));
        assert_eq!(
            err.to_string(),
            "Reddit API error: [reddit:NOT_FOUND] no such user"
        );

        let err = PersonaError::Config("bad".to_string());
        assert_eq!(err.category(), None);
    }
}
