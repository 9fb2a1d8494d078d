//! CoinGecko Market Client
//!
//! Fetches ecosystem snapshots from the CoinGecko v3 REST API, either with one
//! category-filtered markets call or by scanning per-coin platform details.
//!
//! The markets endpoint carries no descriptions, so category snapshots look
//! them up per coin (paced, capped by `describe_limit`, cached by coin id).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::MarketDataClient;
use crate::chain::Chain;
use crate::config::{FetchMode, MarketConfig};
use crate::error::{FinderError, Result};
use crate::model::{CoinRecord, Snapshot, clean_description};

/// Row of `/coins/markets`
#[derive(Debug, Deserialize)]
struct MarketCoin {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    current_price: Option<Decimal>,
    #[serde(default)]
    market_cap: Option<Decimal>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    total_volume: Option<Decimal>,
}

impl From<MarketCoin> for CoinRecord {
    fn from(coin: MarketCoin) -> Self {
        Self {
            id: coin.id,
            name: coin.name,
            symbol: coin.symbol,
            description: clean_description(""),
            market_cap: coin.market_cap,
            current_price: coin.current_price,
            market_cap_rank: coin.market_cap_rank,
            total_volume: coin.total_volume,
        }
    }
}

/// Body of `/coins/{id}`
#[derive(Debug, Deserialize)]
struct CoinDetail {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    description: HashMap<String, Option<String>>,
    #[serde(default)]
    platforms: HashMap<String, Option<String>>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Debug, Default, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Option<Decimal>>,
    #[serde(default)]
    market_cap: HashMap<String, Option<Decimal>>,
    #[serde(default)]
    total_volume: HashMap<String, Option<Decimal>>,
}

impl CoinDetail {
    fn is_on_platform(&self, platform_id: &str) -> bool {
        self.platforms.contains_key(platform_id)
    }

    /// English description, cleaned; the placeholder when absent
    fn english_description(&self) -> String {
        let raw = self.description.get("en").and_then(Option::as_deref).unwrap_or_default();
        clean_description(raw)
    }

    fn into_record(self, vs_currency: &str) -> CoinRecord {
        let quote = |map: &HashMap<String, Option<Decimal>>| map.get(vs_currency).copied().flatten();
        let description = self.english_description();
        let data = self.market_data.unwrap_or_default();

        CoinRecord {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            description,
            market_cap: quote(&data.market_cap),
            current_price: quote(&data.current_price),
            market_cap_rank: self.market_cap_rank,
            total_volume: quote(&data.total_volume),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
}

/// CoinGecko REST client
pub struct CoinGeckoClient {
    client: reqwest::Client,
    config: MarketConfig,
    /// Coin id -> cleaned description
    descriptions: RwLock<HashMap<String, String>>,
}

impl CoinGeckoClient {
    pub fn new(config: MarketConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FinderError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            config,
            descriptions: RwLock::new(HashMap::new()),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));
        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FinderError::Market(format!("{path} returned {status}")));
        }
        Ok(resp.json().await?)
    }

    async fn fetch_markets(&self, order: &str, category: Option<&str>) -> Result<Vec<MarketCoin>> {
        let mut query = vec![
            ("vs_currency", self.config.vs_currency.clone()),
            ("order", order.to_string()),
            ("per_page", self.config.page_size.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        self.get_json("coins/markets", &query).await
    }

    async fn fetch_detail(&self, id: &str) -> Result<CoinDetail> {
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
        ];
        self.get_json(&format!("coins/{id}"), &query).await
    }

    async fn fetch_by_category(&self, chain: &Chain) -> Result<Vec<CoinRecord>> {
        let coins = self.fetch_markets("volume_desc", Some(chain.category_id)).await?;
        let mut records: Vec<CoinRecord> = coins.into_iter().map(CoinRecord::from).collect();
        self.describe(&mut records).await;
        Ok(records)
    }

    /// Fill in descriptions for the first `describe_limit` coins.
    /// Cached ids cost no request; a failed lookup keeps the placeholder.
    async fn describe(&self, coins: &mut [CoinRecord]) {
        let mut requests = 0usize;

        for coin in coins.iter_mut().take(self.config.describe_limit) {
            let cached = self.descriptions.read().await.get(&coin.id).cloned();
            if let Some(description) = cached {
                coin.description = description;
                continue;
            }

            if requests > 0 && self.config.request_delay > Duration::ZERO {
                tokio::time::sleep(self.config.request_delay).await;
            }
            requests += 1;

            match self.fetch_detail(&coin.id).await {
                Ok(detail) => {
                    let description = detail.english_description();
                    self.descriptions
                        .write()
                        .await
                        .insert(coin.id.clone(), description.clone());
                    coin.description = description;
                }
                Err(e) => {
                    tracing::debug!(coin = %coin.id, error = %e, "description unavailable");
                }
            }
        }

        tracing::debug!(
            requests,
            described = coins.len().min(self.config.describe_limit),
            "descriptions filled"
        );
    }

    /// One detail call per candidate, paced by `request_delay`.
    /// Individual detail failures are skipped.
    async fn fetch_by_platform_scan(&self, chain: &Chain) -> Result<Vec<CoinRecord>> {
        let candidates = self.fetch_markets("market_cap_asc", None).await?;
        let mut matching = Vec::new();

        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 && self.config.request_delay > Duration::ZERO {
                tokio::time::sleep(self.config.request_delay).await;
            }
            match self.fetch_detail(&candidate.id).await {
                Ok(detail) if detail.is_on_platform(chain.platform_id) => {
                    matching.push(detail.into_record(&self.config.vs_currency));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(coin = %candidate.id, error = %e, "skipping coin detail");
                }
            }
        }

        Ok(matching)
    }
}

#[async_trait]
impl MarketDataClient for CoinGeckoClient {
    async fn fetch_snapshot(&self, chain: &Chain) -> Snapshot {
        let result = match self.config.fetch_mode {
            FetchMode::Category => self.fetch_by_category(chain).await,
            FetchMode::PlatformScan => self.fetch_by_platform_scan(chain).await,
        };

        match result {
            Ok(coins) => {
                tracing::info!(chain = chain.name, coins = coins.len(), "market snapshot fetched");
                Snapshot::new(chain.name, coins)
            }
            Err(e) => {
                tracing::warn!(chain = chain.name, error = %e, "market snapshot unavailable");
                Snapshot::empty(chain.name)
            }
        }
    }

    async fn search_token(&self, name: &str) -> Result<Option<CoinRecord>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let found: SearchResponse = self.get_json("search", &[("query", name.to_string())]).await?;
        let Some(hit) = found.coins.into_iter().next() else {
            return Ok(None);
        };

        let detail = self.fetch_detail(&hit.id).await?;
        Ok(Some(detail.into_record(&self.config.vs_currency)))
    }

    async fn health_check(&self) -> bool {
        match self.get_json::<serde_json::Value>("ping", &[]).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("CoinGecko health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{COSMOS, ETHEREUM};
    use crate::search::keyword_search;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/v3")
    }

    fn client(base_url: String, fetch_mode: FetchMode) -> CoinGeckoClient {
        CoinGeckoClient::new(MarketConfig {
            base_url,
            fetch_mode,
            request_delay: Duration::ZERO,
            timeout: Duration::from_secs(5),
            ..MarketConfig::default()
        })
        .unwrap()
    }

    /// Category-mode upstream: three DeFi-ish markets rows, details for two of them.
    /// Returns the router and a counter of detail requests served.
    fn defi_router() -> (Router, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new()
            .route(
                "/api/v3/coins/markets",
                get(|| async {
                    Json(json!([
                        {"id": "uniswap", "name": "Uniswap", "symbol": "uni", "market_cap_rank": 20},
                        {"id": "aave", "name": "Aave", "symbol": "aave", "market_cap_rank": 30},
                        {"id": "gala", "name": "Gala", "symbol": "gala", "market_cap_rank": 80}
                    ]))
                }),
            )
            .route(
                "/api/v3/coins/{id}",
                get(move |Path(id): Path<String>| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let text = match id.as_str() {
                            "uniswap" => "Automated market maker, the largest DeFi exchange.",
                            "aave" => "DeFi lending and borrowing protocol.",
                            _ => return Err(StatusCode::TOO_MANY_REQUESTS),
                        };
                        Ok(Json(json!({
                            "id": id,
                            "name": id,
                            "symbol": id,
                            "description": {"en": text},
                            "platforms": {"ethereum": "0xabc"}
                        })))
                    }
                }),
            );
        (router, hits)
    }

    fn detail(id: &str, platform: &str) -> Value {
        let mut platforms = serde_json::Map::new();
        platforms.insert(platform.to_string(), json!("0xabc"));
        json!({
            "id": id,
            "name": id.to_uppercase(),
            "symbol": id,
            "description": {"en": format!("{id} does things")},
            "platforms": platforms,
            "market_cap_rank": 40,
            "market_data": {
                "current_price": {"usd": 1.25},
                "market_cap": {"usd": 125_000_000},
                "total_volume": {"usd": null}
            }
        })
    }

    #[test]
    fn test_decode_market_row_with_nulls() {
        let row: MarketCoin = serde_json::from_value(json!({
            "id": "osmosis",
            "name": "Osmosis",
            "symbol": "osmo",
            "current_price": 0.000022,
            "market_cap": null,
            "market_cap_rank": null,
            "total_volume": 1520000.5
        }))
        .unwrap();

        let record = CoinRecord::from(row);
        assert_eq!(record.current_price, Some(dec!(0.000022)));
        assert_eq!(record.market_cap, None);
        assert!(!record.is_ranked());
        assert_eq!(record.total_volume, Some(dec!(1520000.5)));
        assert_eq!(record.description, "No description.");
    }

    #[test]
    fn test_detail_into_record() {
        let detail: CoinDetail = serde_json::from_value(detail("akash", "cosmos")).unwrap();
        assert!(detail.is_on_platform("cosmos"));
        assert!(!detail.is_on_platform("ethereum"));

        let record = detail.into_record("usd");
        assert_eq!(record.description, "akash does things");
        assert_eq!(record.current_price, Some(dec!(1.25)));
        assert_eq!(record.total_volume, None);
        assert_eq!(record.market_cap_rank, Some(40));
    }

    #[tokio::test]
    async fn test_category_snapshot() {
        let router = Router::new().route(
            "/api/v3/coins/markets",
            get(|axum::extract::Query(q): axum::extract::Query<HashMap<String, String>>| async move {
                assert_eq!(q.get("category").map(String::as_str), Some("ethereum-ecosystem"));
                assert_eq!(q.get("order").map(String::as_str), Some("volume_desc"));
                Json(json!([
                    {"id": "chainlink", "name": "Chainlink", "symbol": "link",
                     "current_price": 24.5, "market_cap": 15300000000u64,
                     "market_cap_rank": 12, "total_volume": 820000000}
                ]))
            }),
        );
        let market = client(serve(router).await, FetchMode::Category);

        let snapshot = market.fetch_snapshot(&ETHEREUM).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.coins[0].market_cap_rank, Some(12));
    }

    #[tokio::test]
    async fn test_category_snapshot_is_keyword_searchable() {
        let (router, hits) = defi_router();
        let market = client(serve(router).await, FetchMode::Category);

        let snapshot = market.fetch_snapshot(&ETHEREUM).await;
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.coins[1].description, "DeFi lending and borrowing protocol.");
        // Failed lookup keeps the placeholder
        assert_eq!(snapshot.coins[2].description, "No description.");

        let defi: Vec<_> = keyword_search("defi", &snapshot.coins)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(defi, ["uniswap", "aave"]);
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        // Second snapshot only retries the coin that failed
        let again = market.fetch_snapshot(&ETHEREUM).await;
        assert_eq!(keyword_search("DeFi", &again.coins).len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_describe_limit_caps_detail_calls() {
        let (router, hits) = defi_router();
        let market = CoinGeckoClient::new(MarketConfig {
            base_url: serve(router).await,
            request_delay: Duration::ZERO,
            describe_limit: 1,
            ..MarketConfig::default()
        })
        .unwrap();

        let snapshot = market.fetch_snapshot(&ETHEREUM).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(snapshot.coins[0].description.contains("DeFi exchange"));
        assert_eq!(snapshot.coins[1].description, "No description.");
    }

    #[tokio::test]
    async fn test_platform_scan_keeps_chain_coins() {
        let router = Router::new()
            .route(
                "/api/v3/coins/markets",
                get(|| async {
                    Json(json!([
                        {"id": "akash", "name": "Akash", "symbol": "akt"},
                        {"id": "broken", "name": "Broken", "symbol": "brk"},
                        {"id": "pepe", "name": "Pepe", "symbol": "pepe"}
                    ]))
                }),
            )
            .route(
                "/api/v3/coins/{id}",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "akash" => Ok(Json(detail("akash", "cosmos"))),
                        "pepe" => Ok(Json(detail("pepe", "ethereum"))),
                        _ => Err(StatusCode::TOO_MANY_REQUESTS),
                    }
                }),
            );
        let market = client(serve(router).await, FetchMode::PlatformScan);

        let snapshot = market.fetch_snapshot(&COSMOS).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.coins[0].id, "akash");
    }

    #[tokio::test]
    async fn test_upstream_error_yields_empty_snapshot() {
        let router = Router::new().route(
            "/api/v3/coins/markets",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let market = client(serve(router).await, FetchMode::Category);

        assert!(market.fetch_snapshot(&ETHEREUM).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_token() {
        let router = Router::new()
            .route(
                "/api/v3/search",
                get(|| async { Json(json!({"coins": [{"id": "akash"}]})) }),
            )
            .route(
                "/api/v3/coins/{id}",
                get(|Path(id): Path<String>| async move { Json(detail(&id, "cosmos")) }),
            );
        let market = client(serve(router).await, FetchMode::Category);

        let found = market.search_token("akash").await.unwrap().unwrap();
        assert_eq!(found.id, "akash");
        assert!(market.search_token("   ").await.unwrap().is_none());
    }
}
