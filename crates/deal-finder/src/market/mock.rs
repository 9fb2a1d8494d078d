//! Mock Market Client
//!
//! For testing and offline demos. Returns a fixed set of ecosystem coins.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MarketDataClient;
use crate::chain::Chain;
use crate::error::Result;
use crate::model::{CoinRecord, Snapshot};

/// Mock market client with static records
pub struct MockMarketClient {
    coins: Vec<CoinRecord>,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    pub fn new() -> Self {
        Self {
            coins: default_coins(),
        }
    }

    /// Serve exactly these records for every chain
    pub const fn with_coins(coins: Vec<CoinRecord>) -> Self {
        Self { coins }
    }

    /// A client whose upstream is "down": every snapshot is empty
    pub const fn unavailable() -> Self {
        Self { coins: Vec::new() }
    }
}

fn coin(
    id: &str,
    name: &str,
    symbol: &str,
    rank: Option<u32>,
    price: Decimal,
    market_cap: Decimal,
    volume: Decimal,
    description: &str,
) -> CoinRecord {
    let mut record = CoinRecord::new(id, name, symbol)
        .with_description(description)
        .with_price(price)
        .with_market_cap(market_cap)
        .with_volume(volume);
    record.market_cap_rank = rank;
    record
}

// (id, name, symbol, rank, price, market cap, 24h volume, description)
fn default_coins() -> Vec<CoinRecord> {
    vec![
        coin("ethereum", "Ethereum", "eth", Some(2), dec!(3450), dec!(415_000_000_000), dec!(15_000_000_000),
            "Smart contract platform and home of most DeFi."),
        coin("tether", "Tether", "usdt", Some(3), dec!(1), dec!(140_000_000_000), dec!(45_000_000_000),
            "Dollar-pegged stablecoin."),
        coin("chainlink", "Chainlink", "link", Some(12), dec!(24.50), dec!(15_300_000_000), dec!(820_000_000),
            "Decentralized oracle network connecting smart contracts to real-world data."),
        coin("uniswap", "Uniswap", "uni", Some(20), dec!(14.20), dec!(8_500_000_000), dec!(410_000_000),
            "Automated market maker DEX for swapping ERC-20 tokens."),
        coin("render-token", "Render", "render", Some(35), dec!(7.10), dec!(3_700_000_000), dec!(260_000_000),
            "Distributed GPU rendering and AI compute network."),
        coin("immutable-x", "Immutable", "imx", Some(48), dec!(1.65), dec!(2_800_000_000), dec!(95_000_000),
            "Layer 2 scaling for NFTs and web3 gaming."),
        coin("aave", "Aave", "aave", Some(30), dec!(310), dec!(4_600_000_000), dec!(380_000_000),
            "DeFi lending and borrowing protocol."),
        coin("ocean-protocol", "Ocean Protocol", "ocean", Some(140), dec!(0.72), dec!(410_000_000), dec!(41_000_000),
            "Data marketplace for AI training sets."),
        coin("gala", "GALA", "gala", Some(110), dec!(0.041), dec!(1_500_000_000), dec!(150_000_000),
            "Gaming platform with player-owned assets."),
        coin("fresh-launch", "Fresh Launch", "frsh", None, dec!(0.0042), dec!(1_200_000), dec!(9_000_000_000),
            "Newly listed token without a market-cap rank."),
    ]
}

#[async_trait]
impl MarketDataClient for MockMarketClient {
    async fn fetch_snapshot(&self, chain: &Chain) -> Snapshot {
        Snapshot::new(chain.name, self.coins.clone())
    }

    async fn search_token(&self, name: &str) -> Result<Option<CoinRecord>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .coins
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle) || c.symbol.eq_ignore_ascii_case(&needle))
            .cloned())
    }

    async fn health_check(&self) -> bool {
        true // Mock always healthy
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ETHEREUM;

    #[tokio::test]
    async fn test_mock_snapshot() {
        let market = MockMarketClient::new();
        let snapshot = market.fetch_snapshot(&ETHEREUM).await;
        assert_eq!(snapshot.chain, "Ethereum");
        assert_eq!(snapshot.len(), 10);
        assert!(snapshot.coins.iter().any(|c| !c.is_ranked()));
    }

    #[tokio::test]
    async fn test_unavailable_is_empty() {
        let market = MockMarketClient::unavailable();
        assert!(market.fetch_snapshot(&ETHEREUM).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_name_or_symbol() {
        let market = MockMarketClient::new();
        let link = market.search_token("chainlink").await.unwrap().unwrap();
        assert_eq!(link.id, "chainlink");
        let imx = market.search_token("IMX").await.unwrap().unwrap();
        assert_eq!(imx.name, "Immutable");
        assert!(market.search_token("notreal").await.unwrap().is_none());
    }
}
