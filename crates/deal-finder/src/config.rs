//! Finder Configuration
//!
//! Process-wide settings, read once at startup and passed into the fetcher,
//! engine and summarizer at construction.

use std::fmt;
use std::time::Duration;

use llm_core::GenerationOptions;

/// Default market-data endpoint
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// How a chain's coins are gathered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// One batched markets call filtered by ecosystem category
    #[default]
    Category,
    /// Markets call plus one detail call per coin, keeping coins deployed on the chain
    PlatformScan,
}

impl FetchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "platform-scan" | "platform_scan" | "scan" => Some(Self::PlatformScan),
            _ => None,
        }
    }
}

/// Market-data client settings
#[derive(Clone)]
pub struct MarketConfig {
    pub base_url: String,

    /// Optional demo API key, sent as `x-cg-demo-api-key`
    pub api_key: Option<String>,

    /// Quote currency (e.g., "usd")
    pub vs_currency: String,

    /// Coins requested per markets call
    pub page_size: u32,

    pub fetch_mode: FetchMode,

    /// Pause between per-coin detail calls
    pub request_delay: Duration,

    /// Category mode: coins per snapshot whose description is looked up
    pub describe_limit: usize,

    pub timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_URL.into(),
            api_key: None,
            vs_currency: "usd".into(),
            page_size: 100,
            fetch_mode: FetchMode::Category,
            request_delay: Duration::from_millis(1500),
            describe_limit: 25,
            timeout: Duration::from_secs(15),
        }
    }
}

impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("vs_currency", &self.vs_currency)
            .field("page_size", &self.page_size)
            .field("fetch_mode", &self.fetch_mode)
            .field("request_delay", &self.request_delay)
            .field("describe_limit", &self.describe_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Pick selection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickingConfig {
    /// Picks per cycle (capped at 5)
    pub pick_count: usize,

    /// Coins ranked at or above this are considered too well-known
    pub excluded_top_rank: u32,

    /// Coin names embedded in the AI prompt
    pub prompt_coin_limit: usize,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            pick_count: 5,
            excluded_top_rank: 3,
            prompt_coin_limit: 50,
        }
    }
}

/// Complete finder configuration
#[derive(Clone, Debug, Default)]
pub struct FinderConfig {
    pub market: MarketConfig,
    pub picking: PickingConfig,
    pub generation: GenerationOptions,
}

impl FinderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| {
            get(key).and_then(|v| {
                let value = v.trim().parse::<u64>().ok();
                if value.is_none() {
                    tracing::warn!(key, value = %v, "ignoring non-numeric setting");
                }
                value
            })
        };

        let defaults = Self::default();

        let market = MarketConfig {
            base_url: get("COINGECKO_BASE_URL").unwrap_or(defaults.market.base_url),
            api_key: get("COINGECKO_API_KEY"),
            vs_currency: get("VS_CURRENCY")
                .map(|c| c.trim().to_ascii_lowercase())
                .unwrap_or(defaults.market.vs_currency),
            page_size: parsed("MARKET_PAGE_SIZE")
                .and_then(|n| u32::try_from(n).ok())
                .map_or(defaults.market.page_size, |n| n.clamp(1, 250)),
            fetch_mode: get("MARKET_FETCH_MODE")
                .and_then(|m| FetchMode::parse(&m))
                .unwrap_or(defaults.market.fetch_mode),
            request_delay: parsed("MARKET_REQUEST_DELAY_MS")
                .map_or(defaults.market.request_delay, Duration::from_millis),
            describe_limit: parsed("MARKET_DESCRIBE_LIMIT")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.market.describe_limit),
            timeout: parsed("HTTP_TIMEOUT_SECS").map_or(defaults.market.timeout, Duration::from_secs),
        };

        let generation = GenerationOptions {
            model: get("AI_MODEL").unwrap_or(defaults.generation.model),
            temperature: get("AI_TEMPERATURE")
                .and_then(|t| t.trim().parse::<f32>().ok())
                .filter(|t| (0.0..=2.0).contains(t))
                .unwrap_or(defaults.generation.temperature),
            max_tokens: parsed("AI_MAX_TOKENS")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.generation.max_tokens),
        };

        Self {
            market,
            picking: defaults.picking,
            generation,
        }
    }
}
