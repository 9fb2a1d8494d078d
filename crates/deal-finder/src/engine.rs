//! Recommendation Engine
//!
//! Decides which coins to present for a chain: the model's ranking when a
//! provider is configured and answers with something parseable, otherwise the
//! deterministic fallback. It never fails.

use std::sync::Arc;

use llm_core::LlmProvider;

use crate::chain::Chain;
use crate::config::FinderConfig;
use crate::model::{CoinRecord, Recommendation};
use crate::parser;
use crate::strategy::{AiStrategy, FallbackStrategy};

pub struct RecommendationEngine {
    ai: Option<AiStrategy>,
    fallback: FallbackStrategy,
}

impl RecommendationEngine {
    /// `provider = None` means every selection uses the fallback
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: &FinderConfig) -> Self {
        let ai = provider.map(|p| {
            AiStrategy::new(
                p,
                config.generation.clone(),
                config.picking.prompt_coin_limit,
            )
        });
        Self {
            ai,
            fallback: FallbackStrategy::new(&config.picking),
        }
    }

    pub async fn select_picks(&self, chain: &Chain, snapshot: &[CoinRecord]) -> Recommendation {
        if let Some(ai) = &self.ai {
            if let Some(reply) = ai.request(chain, snapshot).await {
                let blocks = parser::parse(&reply);
                if blocks.is_empty() {
                    tracing::warn!(chain = chain.name, "AI reply had no usable blocks, falling back");
                } else {
                    tracing::info!(chain = chain.name, blocks = blocks.len(), "AI picks ready");
                    return Recommendation::Ai { reply, blocks };
                }
            }
        }

        let picks = self.fallback.select(snapshot);
        tracing::info!(chain = chain.name, picks = picks.len(), "fallback picks ready");
        Recommendation::Fallback { picks }
    }
}
