//! OpenAI-compatible Provider
//!
//! Implementation of `LlmProvider` for any `/chat/completions` endpoint.

use async_trait::async_trait;
use llm_core::{
    error::{LlmError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ProviderInfo, TokenUsage},
};
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::http::{build_client, status_error, transport_error};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI-compatible chat-completion provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiProvider {
    /// Create from configuration. Fails without an API key.
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::Config("OPENAI_API_KEY is not set".into()))?;
        let client = build_client(config.timeout_secs)?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn convert_completion(response: ChatCompletionResponse, requested_model: &str) -> Completion {
        let model = response
            .model
            .unwrap_or_else(|| requested_model.to_string());
        let choice = response.choices.into_iter().next();
        let finish_reason = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref())
            .map(FinishReason::from_provider);
        let content = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        Completion {
            content,
            model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "OpenAI".into(),
            endpoint: self.config.base_url.clone(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        match self
            .client
            .get(self.url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatCompletionRequest {
            model: &options.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let resp = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let response: ChatCompletionResponse = serde_json::from_str(&body)?;
        let completion = Self::convert_completion(response, &options.model);
        tracing::debug!(
            model = %completion.model,
            chars = completion.content.len(),
            "chat completion received"
        );
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn provider(base_url: String) -> OpenAiProvider {
        OpenAiProvider::from_config(OpenAiConfig {
            base_url,
            api_key: Some("sk-test".into()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_request_shape() {
        let messages = [Message::user("pick coins")];
        let request = ChatCompletionRequest {
            model: "gpt-4",
            messages: &messages,
            max_tokens: 800,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "pick coins");
        assert_eq!(value["max_tokens"], 800);
    }

    #[test]
    fn test_convert_completion_without_choices() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        let completion = OpenAiProvider::convert_completion(response, "gpt-4");
        assert_eq!(completion.content, "");
        assert_eq!(completion.model, "gpt-4");
        assert!(completion.finish_reason.is_none());
    }

    #[tokio::test]
    async fn test_complete_against_local_server() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["messages"][0]["role"], "user");
                Json(json!({
                    "model": "gpt-4-0613",
                    "choices": [{
                        "message": {"role": "assistant", "content": "Chainlink:\nOracles."},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
                }))
            }),
        );
        let provider = provider(serve(router).await);

        let completion = provider
            .complete(&[Message::user("hi")], &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.content, "Chainlink:\nOracles.");
        assert_eq!(completion.model, "gpt-4-0613");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 15);
    }

    #[tokio::test]
    async fn test_rate_limit_is_classified() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let provider = provider(serve(router).await);

        let err = provider
            .complete(&[Message::user("hi")], &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::RateLimited(_)));
    }
}
