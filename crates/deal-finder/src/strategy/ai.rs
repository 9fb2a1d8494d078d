//! AI Strategy
//!
//! Asks the text-generation provider to rank the snapshot. Any failure is
//! reported as `None` so the caller can fall back; there is no retry.

use std::sync::Arc;

use llm_core::{GenerationOptions, LlmProvider, Message};

use crate::chain::Chain;
use crate::model::CoinRecord;
use crate::prompt::picks_prompt;

/// Model-backed picker
pub struct AiStrategy {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
    prompt_coin_limit: usize,
}

impl AiStrategy {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        options: GenerationOptions,
        prompt_coin_limit: usize,
    ) -> Self {
        Self {
            provider,
            options,
            prompt_coin_limit,
        }
    }

    /// Request a ranked reply; `None` on any provider failure or empty reply
    pub async fn request(&self, chain: &Chain, snapshot: &[CoinRecord]) -> Option<String> {
        let prompt = picks_prompt(chain, snapshot, self.prompt_coin_limit);
        tracing::debug!(
            chain = chain.name,
            model = %self.options.model,
            prompt_tokens = Message::user(prompt.as_str()).estimate_tokens(),
            "requesting AI picks"
        );

        match self.provider.complete_text(&prompt, &self.options).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::warn!(
                    provider = %self.provider.info().name,
                    chain = chain.name,
                    error = %e,
                    retryable = e.is_retryable(),
                    "AI picks unavailable, falling back"
                );
                None
            }
        }
    }
}
