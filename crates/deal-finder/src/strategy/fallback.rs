//! Fallback Strategy
//!
//! Deterministic, network-free ranking used whenever the model is unavailable.
//!
//! 1. Sort by 24h volume, descending (missing volume last; ties keep snapshot order)
//! 2. Drop well-known coins: rank present and `<= excluded_top_rank`
//! 3. Drop unranked coins
//! 4. Keep the first `pick_count` (at most 5)

use crate::config::PickingConfig;
use crate::model::{CoinRecord, PickSet};

/// Volume-ranked fallback picker
#[derive(Clone, Debug)]
pub struct FallbackStrategy {
    excluded_top_rank: u32,
    pick_count: usize,
}

impl Default for FallbackStrategy {
    fn default() -> Self {
        Self::new(&PickingConfig::default())
    }
}

impl FallbackStrategy {
    pub const fn new(config: &PickingConfig) -> Self {
        Self {
            excluded_top_rank: config.excluded_top_rank,
            pick_count: config.pick_count,
        }
    }

    /// Whether a record survives the rank filter
    pub const fn is_eligible(&self, coin: &CoinRecord) -> bool {
        match coin.market_cap_rank {
            Some(rank) => rank > self.excluded_top_rank,
            None => false,
        }
    }

    /// Select picks from a snapshot. Pure: same input, same output.
    pub fn select(&self, snapshot: &[CoinRecord]) -> PickSet {
        let mut by_volume: Vec<&CoinRecord> = snapshot.iter().collect();
        // `None < Some(_)`, so reversing the comparison puts missing volume last
        by_volume.sort_by(|a, b| b.total_volume.cmp(&a.total_volume));

        PickSet::take_from(
            by_volume
                .into_iter()
                .filter(|coin| self.is_eligible(coin))
                .cloned(),
            self.pick_count,
        )
    }
}
