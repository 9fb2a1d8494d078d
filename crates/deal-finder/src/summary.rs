//! Coin Summaries
//!
//! Plain-language explanation of a single coin, with the description itself
//! as the fallback when the model cannot answer.

use std::sync::Arc;

use llm_core::{GenerationOptions, LlmProvider};
use serde::Serialize;

use crate::prompt::summary_prompt;

/// Prefix marking a summary that did not come from the model
pub const FALLBACK_PREFIX: &str = "(Fallback summary)";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoinSummary {
    pub text: String,
    pub ai_generated: bool,
}

impl CoinSummary {
    pub fn fallback(description: &str) -> Self {
        Self {
            text: format!("{FALLBACK_PREFIX} {description}"),
            ai_generated: false,
        }
    }
}

pub struct Summarizer {
    provider: Option<Arc<dyn LlmProvider>>,
    options: GenerationOptions,
}

impl Summarizer {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    pub async fn summarize(&self, coin_name: &str, description: &str) -> CoinSummary {
        let Some(provider) = &self.provider else {
            return CoinSummary::fallback(description);
        };

        let prompt = summary_prompt(coin_name, description);
        match provider.complete_text(&prompt, &self.options).await {
            Ok(text) => CoinSummary {
                text,
                ai_generated: true,
            },
            Err(e) => {
                tracing::warn!(coin = coin_name, error = %e, "summary unavailable, using description");
                CoinSummary::fallback(description)
            }
        }
    }
}
