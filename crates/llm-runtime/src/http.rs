//! Shared HTTP plumbing for providers

use std::time::Duration;

use llm_core::{LlmError, Result};
use reqwest::StatusCode;

pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))
}

/// Classify a transport failure
pub fn transport_error(err: &reqwest::Error) -> LlmError {
    if err.is_connect() || err.is_timeout() {
        LlmError::ProviderUnavailable(err.to_string())
    } else if err.is_decode() {
        LlmError::Parse(err.to_string())
    } else {
        LlmError::Provider(err.to_string())
    }
}

/// Classify a non-success HTTP status
pub fn status_error(status: StatusCode, body: &str) -> LlmError {
    let snippet: String = body.chars().take(200).collect();
    let detail = format!("{status}: {snippet}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(detail),
        s if s.is_server_error() => LlmError::ProviderUnavailable(detail),
        _ => LlmError::Provider(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key"),
            LlmError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            LlmError::RateLimited(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, ""),
            LlmError::ProviderUnavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "nope"),
            LlmError::Provider(_)
        ));
    }

    #[test]
    fn test_status_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = status_error(StatusCode::BAD_REQUEST, &body);
        assert!(err.to_string().len() < 300);
    }
}
