//! Prompt Construction

use crate::chain::Chain;
use crate::model::CoinRecord;

/// Instruction appended after the coin list
pub const PICKS_INSTRUCTION: &str = r"Pick the top 5 lesser-known coins from this list that look most promising right now. Skip the largest, most famous coins.

For each pick, answer in exactly this format, with one blank line between picks:

Coin Name:
A detailed explanation of why it is promising (technology, adoption, momentum).
Simpler terms: the same idea explained for someone new to crypto.

Do not add an introduction, numbering or a closing remark.";

/// Build the ranking prompt from at most `coin_limit` names of the snapshot
pub fn picks_prompt(chain: &Chain, coins: &[CoinRecord], coin_limit: usize) -> String {
    let names = coins
        .iter()
        .take(coin_limit)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Here are coins from the {} ecosystem: {names}.\n\n{PICKS_INSTRUCTION}",
        chain.name
    )
}

/// Prompt for a single coin's plain-language summary
pub fn summary_prompt(coin_name: &str, description: &str) -> String {
    format!(
        "Explain why {coin_name} is a promising altcoin in simple terms using this description: {description}"
    )
}
