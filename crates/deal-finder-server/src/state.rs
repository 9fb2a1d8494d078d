//! Application State

use std::sync::Arc;

use deal_finder::{FinderConfig, MarketDataClient, RecommendationEngine, Summarizer, TokenLookup};
use llm_core::LlmProvider;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// Text-generation provider (None = fallback only)
    pub provider: Option<Arc<dyn LlmProvider>>,

    /// Market-data client (CoinGecko or mock)
    pub market: Arc<dyn MarketDataClient>,

    pub engine: Arc<RecommendationEngine>,

    /// Plain-language coin summaries, shared with `lookup`
    pub summarizer: Arc<Summarizer>,

    pub lookup: Arc<TokenLookup>,
}

impl AppState {
    pub fn new(
        config: &FinderConfig,
        provider: Option<Arc<dyn LlmProvider>>,
        market: Arc<dyn MarketDataClient>,
    ) -> Self {
        let engine = RecommendationEngine::new(provider.clone(), config);
        let summarizer = Arc::new(Summarizer::new(provider.clone(), config.generation.clone()));
        let lookup = TokenLookup::new(market.clone(), summarizer.clone());

        Self {
            provider,
            market,
            engine: Arc::new(engine),
            summarizer,
            lookup: Arc::new(lookup),
        }
    }
}
