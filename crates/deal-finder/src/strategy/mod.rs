//! Pick Strategies
//!
//! The model-backed strategy and its deterministic fallback.

mod ai;
mod fallback;

pub use ai::AiStrategy;
pub use fallback::FallbackStrategy;
