//! Domain Models
//!
//! Core data types for market snapshots and picks.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of picks shown per cycle
pub const MAX_PICKS: usize = 5;

/// Descriptions are cut to this many characters
pub const DESCRIPTION_LIMIT: usize = 300;

/// Placeholder for coins without a description
pub const NO_DESCRIPTION: &str = "No description.";

/// One coin as returned by the market-data service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Market-data identifier (e.g., "chainlink")
    pub id: String,

    /// Display name (e.g., "Chainlink")
    pub name: String,

    /// Ticker symbol as reported (usually lowercase)
    pub symbol: String,

    /// Free-text description, at most 300 characters
    pub description: String,

    pub market_cap: Option<Decimal>,

    pub current_price: Option<Decimal>,

    /// Market-cap rank; `None` means unranked
    pub market_cap_rank: Option<u32>,

    /// 24h trading volume
    pub total_volume: Option<Decimal>,
}

impl CoinRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            description: NO_DESCRIPTION.into(),
            market_cap: None,
            current_price: None,
            market_cap_rank: None,
            total_volume: None,
        }
    }

    /// Set the description, truncating and substituting the placeholder for blanks
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = clean_description(description);
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.market_cap_rank = Some(rank);
        self
    }

    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.total_volume = Some(volume);
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: Decimal) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub const fn is_ranked(&self) -> bool {
        self.market_cap_rank.is_some()
    }
}

/// Truncate to [`DESCRIPTION_LIMIT`] characters, or the placeholder when blank
pub fn clean_description(raw: &str) -> String {
    let truncated: String = raw.trim().chars().take(DESCRIPTION_LIMIT).collect();
    if truncated.is_empty() {
        NO_DESCRIPTION.into()
    } else {
        truncated
    }
}

/// A single fetched batch of coin records, valid for one display cycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Chain display name the snapshot was fetched for
    pub chain: String,

    pub coins: Vec<CoinRecord>,

    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(chain: impl Into<String>, coins: Vec<CoinRecord>) -> Self {
        Self {
            chain: chain.into(),
            coins,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty(chain: impl Into<String>) -> Self {
        Self::new(chain, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }
}

/// Ordered picks for display, never more than [`MAX_PICKS`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickSet(#[serde(deserialize_with = "deserialize_capped")] Vec<CoinRecord>);

/// Deserialized pick lists go through the same cap as [`PickSet::take_from`]
fn deserialize_capped<'de, D>(deserializer: D) -> std::result::Result<Vec<CoinRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let records = Vec::<CoinRecord>::deserialize(deserializer)?;
    Ok(PickSet::take_from(records, MAX_PICKS).0)
}

impl PickSet {
    /// Take up to `count` records (capped at [`MAX_PICKS`]) in iteration order
    pub fn take_from<I>(records: I, count: usize) -> Self
    where
        I: IntoIterator<Item = CoinRecord>,
    {
        Self(records.into_iter().take(count.min(MAX_PICKS)).collect())
    }

    pub fn records(&self) -> &[CoinRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoinRecord> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PickSet {
    type Item = &'a CoinRecord;
    type IntoIter = std::slice::Iter<'a, CoinRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A coin the model picked, split into its explanation parts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPick {
    /// Cleaned coin name
    pub name: String,
    /// Header line as the model wrote it (e.g. `1. **Chainlink:**`)
    pub header: String,
    pub detailed_text: String,
    /// Empty when the model gave no "Simpler terms:" section
    pub simpler_text: String,
}

/// One segment of a model reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AiPickBlock {
    Pick(AiPick),
    /// Segment without a `Name:` header, shown as-is
    Verbatim { text: String },
}

impl AiPickBlock {
    pub const fn as_pick(&self) -> Option<&AiPick> {
        match self {
            Self::Pick(pick) => Some(pick),
            Self::Verbatim { .. } => None,
        }
    }

    pub const fn is_verbatim(&self) -> bool {
        matches!(self, Self::Verbatim { .. })
    }
}

/// Outcome of the recommendation engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Recommendation {
    /// The model answered; `blocks` is its parsed reply
    Ai { reply: String, blocks: Vec<AiPickBlock> },
    /// Deterministic picks from the snapshot alone
    Fallback { picks: PickSet },
}

impl Recommendation {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub const fn source(&self) -> &'static str {
        match self {
            Self::Ai { .. } => "ai",
            Self::Fallback { .. } => "fallback",
        }
    }
}
