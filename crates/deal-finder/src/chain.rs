//! Supported Chains
//!
//! Each chain maps to the market-data service's platform id (used to test a
//! coin's contract platforms) and its ecosystem category (used for the batched
//! markets call).

use serde::Serialize;

/// A blockchain whose ecosystem coins can be picked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Chain {
    /// Display name (e.g., "Ethereum")
    pub name: &'static str,

    /// Platform id in a coin's `platforms` map
    pub platform_id: &'static str,

    /// Ecosystem category id for `/coins/markets?category=`
    pub category_id: &'static str,

    /// Preset explore keywords
    pub keywords: &'static [&'static str],
}

pub const ETHEREUM: Chain = Chain {
    name: "Ethereum",
    platform_id: "ethereum",
    category_id: "ethereum-ecosystem",
    keywords: &["AI", "Gaming", "DeFi"],
};

pub const XRP: Chain = Chain {
    name: "XRP",
    platform_id: "ripple",
    category_id: "xrp-ledger-ecosystem",
    keywords: &["Payments", "Staking", "Real World Assets"],
};

pub const COSMOS: Chain = Chain {
    name: "Cosmos",
    platform_id: "cosmos",
    category_id: "cosmos-ecosystem",
    keywords: &["IBC", "AMM", "Governance"],
};

/// All built-in chains, in menu order
pub const CHAINS: &[Chain] = &[ETHEREUM, XRP, COSMOS];

impl Chain {
    /// Find a chain by display name or platform id, ignoring case
    pub fn find(query: &str) -> Option<Self> {
        let query = query.trim();
        CHAINS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(query) || c.platform_id.eq_ignore_ascii_case(query))
            .copied()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_or_platform() {
        assert_eq!(Chain::find("xrp"), Some(XRP));
        assert_eq!(Chain::find("ripple"), Some(XRP));
        assert_eq!(Chain::find(" Cosmos "), Some(COSMOS));
        assert_eq!(Chain::find("solana"), None);
    }

    #[test]
    fn test_every_chain_has_three_keywords() {
        for chain in CHAINS {
            assert_eq!(chain.keywords.len(), 3, "{}", chain.name);
        }
    }
}
