//! # llm-core
//!
//! Provider-agnostic text generation for the deal finder.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────────┐
//! │  Recommendation      │      │  LlmProvider (Strategy)      │
//! │  Engine / Summarizer │─────▶│  OpenAI-compatible | Ollama  │
//! └──────────────────────┘      └──────────────────────────────┘
//! ```
//!
//! Callers only see the `LlmProvider` trait, so the hosted model can be swapped
//! (or removed entirely) without touching the picking logic.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{LlmError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ProviderInfo};
