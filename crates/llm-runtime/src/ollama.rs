//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` for local Ollama inference.

use async_trait::async_trait;
use llm_core::{
    error::{LlmError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ProviderInfo, TokenUsage},
};
use ollama_rs::{
    Ollama,
    error::OllamaError,
    generation::chat::{ChatMessage, ChatMessageResponse, MessageRole, request::ChatMessageRequest},
    models::ModelOptions,
};
use reqwest::Url;

use crate::config::OllamaConfig;
use crate::http::{build_client, transport_error};

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create from configuration. Fails on a host that is not an http(s) URL.
    pub fn from_config(config: OllamaConfig) -> Result<Self> {
        let mut url = Url::parse(&config.host)
            .map_err(|e| LlmError::Config(format!("invalid OLLAMA_HOST '{}': {e}", config.host)))?;
        url.set_port(Some(config.port))
            .map_err(|()| LlmError::Config(format!("OLLAMA_HOST '{}' cannot take a port", config.host)))?;

        let http = build_client(config.timeout_secs)?;
        Ok(Self {
            client: Ollama::new_with_client(url, config.port, http),
            config,
        })
    }

    /// Convert chat messages to Ollama format
    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    Role::User => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect()
    }

    /// Build Ollama generation options
    fn build_options(opts: &GenerationOptions) -> ModelOptions {
        ModelOptions::default()
            .temperature(opts.temperature)
            .num_predict(i32::try_from(opts.max_tokens).unwrap_or(i32::MAX))
    }

    /// Convert Ollama response to a completion
    fn convert_completion(response: ChatMessageResponse) -> Completion {
        let count = |n: u64| u32::try_from(n).unwrap_or(u32::MAX);

        Completion {
            content: response.message.content,
            model: response.model,
            usage: response.final_data.as_ref().map(|d| TokenUsage {
                prompt_tokens: count(d.prompt_eval_count),
                completion_tokens: count(d.eval_count),
                total_tokens: count(d.prompt_eval_count.saturating_add(d.eval_count)),
            }),
            finish_reason: response.done.then_some(FinishReason::Stop),
        }
    }
}

/// Classify an ollama-rs failure
fn ollama_error(err: OllamaError) -> LlmError {
    match err {
        OllamaError::ReqwestError(e) => transport_error(&e),
        OllamaError::JsonError(e) => LlmError::Parse(e.to_string()),
        OllamaError::InternalError(e) => LlmError::Provider(e.message),
        // Non-success status; ollama-rs hands back the body only
        OllamaError::Other(body) => LlmError::Provider(body),
        other => LlmError::Other(other.to_string()),
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Ollama".into(),
            endpoint: self.config.base_url(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.list_local_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatMessageRequest::new(options.model.clone(), Self::convert_messages(messages))
            .options(Self::build_options(options));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(ollama_error)?;

        Ok(Self::convert_completion(response))
    }
}
