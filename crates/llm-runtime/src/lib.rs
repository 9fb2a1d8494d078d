//! # llm-runtime
//!
//! Concrete text-generation providers for the deal finder.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): any `/chat/completions` endpoint with a bearer key
//! - **Ollama**: local inference through the `/api/chat` endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llm_runtime::{build_provider, ProviderConfig};
//!
//! let provider = build_provider(&ProviderConfig::from_env())?;
//! ```

pub mod config;
mod http;

#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;

pub use config::{ProviderConfig, ProviderKind};
#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;
#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;

// Re-export core types for convenience
pub use llm_core::{GenerationOptions, LlmError, LlmProvider, Message, Result, Role};

/// Build the configured provider.
///
/// Returns `Ok(None)` when text generation is switched off, in which case
/// callers go straight to their deterministic paths.
pub fn build_provider(config: &ProviderConfig) -> Result<Option<Arc<dyn LlmProvider>>> {
    match config.kind {
        ProviderKind::Disabled => Ok(None),
        #[cfg(feature = "openai")]
        ProviderKind::OpenAi => {
            let provider = OpenAiProvider::from_config(config.openai.clone())?;
            Ok(Some(Arc::new(provider)))
        }
        #[cfg(feature = "ollama")]
        ProviderKind::Ollama => {
            let provider = OllamaProvider::from_config(config.ollama.clone())?;
            Ok(Some(Arc::new(provider)))
        }
        #[allow(unreachable_patterns)]
        other => Err(LlmError::Config(format!(
            "provider '{other}' is not compiled into this build"
        ))),
    }
}
