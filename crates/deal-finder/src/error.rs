//! Error Types for the Deal Finder

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Market data error: {0}")]
    Market(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
