//! # deal-finder
//!
//! Altcoin picks for a chosen chain: fetch a market snapshot, ask a hosted
//! model to rank the lesser-known coins, and fall back to a deterministic
//! volume ranking whenever the model cannot help.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────────┐   ┌──────────────────────┐   ┌──────────────┐
//! │ MarketData    │──▶│ RecommendationEngine │──▶│ Recommendation│
//! │ (snapshot)    │   │  ├─ AiStrategy ──────┼──▶│  Ai { blocks }│
//! └───────────────┘   │  │    └─ parser      │   │  Fallback     │
//!                     │  └─ FallbackStrategy │   │  { picks }    │
//!                     └──────────────────────┘   └──────────────┘
//! ```
//!
//! ## Fallback policy
//!
//! Sort by 24h volume, drop the top-3 ranked coins and every unranked coin,
//! keep five. Same snapshot in, same picks out.

pub mod chain;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod market;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod search;
pub mod strategy;
pub mod summary;

#[cfg(test)]
mod testing;

pub use chain::{CHAINS, Chain};
pub use config::{FetchMode, FinderConfig, MarketConfig, PickingConfig};
pub use display::PickCard;
pub use engine::RecommendationEngine;
pub use error::{FinderError, Result};
pub use market::{CoinGeckoClient, MarketDataClient, MockMarketClient};
pub use model::{AiPick, AiPickBlock, CoinRecord, PickSet, Recommendation, Snapshot};
pub use search::{TokenLookup, TokenProfile, keyword_search};
pub use summary::{CoinSummary, Summarizer};
