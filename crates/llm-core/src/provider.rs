//! LLM Provider Strategy Pattern
//!
//! Common interface for hosted (OpenAI-compatible) and local (Ollama) text
//! generation backends.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llm_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = OpenAiProvider::from_config(config)?;
//! let text = provider.complete_text(prompt, &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::message::Message;

/// Configuration for a single generation call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gpt-4", "llama3.2")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    800
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// Whether the provider stopped because it hit the token limit
    pub fn truncated(&self) -> bool {
        self.finish_reason == Some(FinishReason::Length)
    }
}

/// Token usage statistics
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    /// Map a provider's finish-reason string
    pub fn from_provider(reason: &str) -> Self {
        match reason {
            "stop" | "end_turn" => Self::Stop,
            "length" | "max_tokens" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Error,
        }
    }
}

/// Provider metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "OpenAI", "Ollama")
    pub name: String,

    /// Endpoint the provider talks to
    pub endpoint: String,
}

/// Strategy trait for LLM providers
///
/// The recommendation engine and summarizer work exclusively through this
/// interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name and endpoint
    fn info(&self) -> ProviderInfo;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// Send a single user-role prompt and return the trimmed reply text.
    ///
    /// An all-whitespace reply is reported as [`LlmError::EmptyCompletion`].
    async fn complete_text(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let messages = [Message::user(prompt)];
        let completion = self.complete(&messages, options).await?;

        if completion.truncated() {
            tracing::debug!(model = %completion.model, "completion hit the token limit");
        }

        let text = completion.content.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyCompletion(completion.model));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                name: "Canned".into(),
                endpoint: "memory".into(),
            }
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            Ok(Completion {
                content: self.0.into(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            })
        }
    }

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!((opts.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(opts.max_tokens, 800);
        assert_eq!(opts.model, "gpt-4");
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_provider("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_provider("length"), FinishReason::Length);
        assert_eq!(FinishReason::from_provider("weird"), FinishReason::Error);
    }

    #[tokio::test]
    async fn test_complete_text_trims() {
        let provider = CannedProvider("  hello there \n");
        let text = provider
            .complete_text("hi", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "hello there");
    }

    #[tokio::test]
    async fn test_complete_text_rejects_blank_reply() {
        let provider = CannedProvider(" \n\n ");
        let err = provider
            .complete_text("hi", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion(_)));
    }
}
