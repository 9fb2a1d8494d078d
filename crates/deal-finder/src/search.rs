//! Explore & Search
//!
//! Keyword filtering within a chain's snapshot, and free-text token lookup
//! across all chains.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::market::MarketDataClient;
use crate::model::CoinRecord;
use crate::summary::{CoinSummary, Summarizer};

/// How many keyword matches callers usually show
pub const EXPLORE_LIMIT: usize = 3;

/// Coins whose name or description contains `keyword`, ignoring case, in snapshot order
pub fn keyword_search<'a>(keyword: &str, coins: &'a [CoinRecord]) -> Vec<&'a CoinRecord> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    coins
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// A looked-up token with its plain-language summary
#[derive(Clone, Debug, Serialize)]
pub struct TokenProfile {
    pub coin: CoinRecord,
    pub summary: CoinSummary,
}

pub struct TokenLookup {
    market: Arc<dyn MarketDataClient>,
    summarizer: Arc<Summarizer>,
}

impl TokenLookup {
    pub fn new(market: Arc<dyn MarketDataClient>, summarizer: Arc<Summarizer>) -> Self {
        Self { market, summarizer }
    }

    /// `Ok(None)` when the market-data service knows no such token
    pub async fn lookup(&self, name: &str) -> Result<Option<TokenProfile>> {
        let Some(coin) = self.market.search_token(name).await? else {
            tracing::info!(query = name, "token not found");
            return Ok(None);
        };

        let summary = self.summarizer.summarize(&coin.name, &coin.description).await;
        Ok(Some(TokenProfile { coin, summary }))
    }
}
