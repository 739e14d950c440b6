//! HTTP helpers shared by the LLM providers.

use std::time::Duration;

use tracing::warn;

use crate::types::{ErrorClassifier, PersonaError, Result};

/// Build a reqwest client with the configured request timeout
pub fn build_client(timeout_secs: u64, service: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PersonaError::Llm(ErrorClassifier::classify_request(&e, service)))
}

/// Validate an endpoint URL (SSRF prevention)
///
/// Only allows http/https schemes. Non-local hosts are allowed when
/// `warn_remote` is false, otherwise they are logged.
pub fn validate_endpoint(endpoint: &str, service: &str, warn_remote: bool) -> Result<String> {
    let url = url::Url::parse(endpoint).map_err(|e| {
        PersonaError::Config(format!(
            "Invalid {} endpoint URL '{}': {}",
            service, endpoint, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PersonaError::Config(format!(
            "{} endpoint must use http or https scheme, got: {}",
            service,
            url.scheme()
        )));
    }

    if warn_remote
        && let Some(host) = url.host_str()
        && !matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
    {
        warn!(
            "{} endpoint is not localhost: {}. Ensure this is intentional.",
            service, host
        );
    }

    let mut result = url.to_string();
    if result.ends_with('/') {
        result.pop();
    }
    Ok(result)
}

/// Convert a failed transport call into a categorized LLM error
pub fn request_error(err: reqwest::Error, service: &str) -> PersonaError {
    PersonaError::Llm(ErrorClassifier::classify_request(&err, service))
}

/// Convert a non-success HTTP response into a categorized LLM error
pub async fn status_error(response: reqwest::Response, service: &str) -> PersonaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    PersonaError::Llm(ErrorClassifier::classify_http_status(
        status.as_u16(),
        &format!("API error ({}): {}", status, body),
        service,
    ))
}
