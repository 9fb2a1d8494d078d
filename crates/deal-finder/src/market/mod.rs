//! Market Snapshot Fetcher
//!
//! Abstractions and implementations for market-data services.

mod coingecko;
mod mock;

pub use coingecko::CoinGeckoClient;
pub use mock::MockMarketClient;

use async_trait::async_trait;

use crate::chain::Chain;
use crate::error::Result;
use crate::model::{CoinRecord, Snapshot};

/// Market-data client trait (Strategy pattern)
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetch the coins of a chain's ecosystem.
    ///
    /// Never fails: any upstream problem is logged and yields an empty snapshot.
    async fn fetch_snapshot(&self, chain: &Chain) -> Snapshot;

    /// Look a token up by free-text name; `Ok(None)` when nothing matches
    async fn search_token(&self, name: &str) -> Result<Option<CoinRecord>>;

    /// Check if the service is reachable
    async fn health_check(&self) -> bool;

    /// Service name
    fn name(&self) -> &str;
}
