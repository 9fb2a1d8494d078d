//! Test doubles shared by this crate's unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use llm_core::{
    Completion, FinishReason, GenerationOptions, LlmError, LlmProvider, Message, ProviderInfo,
    Result,
};

/// Provider that answers every call with the same reply (or error)
/// and records the prompts it saw.
pub struct ScriptedProvider {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Scripted".into(),
            endpoint: "memory".into(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_some())
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        match &self.reply {
            Some(reply) => Ok(Completion {
                content: reply.clone(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            }),
            None => Err(LlmError::ProviderUnavailable("connection refused".into())),
        }
    }
}
