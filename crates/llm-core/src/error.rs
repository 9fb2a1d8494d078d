//! Error Types

use thiserror::Error;

/// Result type alias for text-generation calls
pub type Result<T> = std::result::Result<T, LlmError>;

/// Text-generation error types
#[derive(Error, Debug)]
pub enum LlmError {
    /// The provider answered with an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but the completion carried no text
    #[error("Empty completion from {0}")]
    EmptyCompletion(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing or invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited by the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl LlmError {
    /// Whether a later attempt could succeed.
    ///
    /// The picking pipeline never retries, but callers that do can use this.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::RateLimited(_))
    }
}
