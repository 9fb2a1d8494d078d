//! Display Projection
//!
//! Flattens a `CoinRecord` into ready-to-render strings. Absent values are
//! spelled out as `N/A` so the presentation side never has to guess.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::CoinRecord;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PickCard {
    pub id: String,
    pub name: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub description: String,
    pub market_cap: String,
    pub price: String,
    pub volume_24h: String,
    pub rank: String,
}

impl From<&CoinRecord> for PickCard {
    fn from(coin: &CoinRecord) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            description: coin.description.clone(),
            market_cap: format_usd_whole(coin.market_cap),
            price: format_price(coin.current_price),
            volume_24h: format_usd_whole(coin.total_volume),
            rank: coin
                .market_cap_rank
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("#{r}")),
        }
    }
}

/// `$1,234,567` (rounded to whole units) or `N/A`
pub fn format_usd_whole(amount: Option<Decimal>) -> String {
    amount.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |a| {
            let rounded = a.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            let digits = rounded.abs().trunc().to_string();
            let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
            format!("{sign}${}", group_thousands(&digits))
        },
    )
}

/// `$0.000022`, `$24.5` (trailing zeros dropped) or `N/A`
pub fn format_price(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| NOT_AVAILABLE.to_string(), |a| format!("${}", a.normalize()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
