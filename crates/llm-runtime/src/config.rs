//! Provider Configuration
//!
//! Read once at startup from the environment. Credentials are never compiled in.

use std::fmt;

/// Default OpenAI-compatible endpoint
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Which backend answers text-generation calls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Ollama,
    /// No provider; every caller takes its fallback path
    Disabled,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "open-ai" => Some(Self::OpenAi),
            "ollama" => Some(Self::Ollama),
            "none" | "off" | "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Ollama => write!(f, "ollama"),
            Self::Disabled => write!(f, "none"),
        }
    }
}

/// OpenAI-compatible endpoint settings
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Base URL up to and including the version segment
    pub base_url: String,

    /// Bearer token
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.into(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Ollama settings
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }
}

/// Complete provider configuration
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub openai: OpenAiConfig,
    pub ollama: OllamaConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Disabled,
            openai: OpenAiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// `LLM_PROVIDER` wins when set and valid. Otherwise an `OPENAI_API_KEY`
    /// selects OpenAI and its absence disables generation.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY");
        let explicit = get("LLM_PROVIDER").and_then(|v| {
            let kind = ProviderKind::parse(&v);
            if kind.is_none() {
                tracing::warn!(value = %v, "unknown LLM_PROVIDER, ignoring");
            }
            kind
        });
        let kind = explicit.unwrap_or(if api_key.is_some() {
            ProviderKind::OpenAi
        } else {
            ProviderKind::Disabled
        });

        let openai_defaults = OpenAiConfig::default();
        let ollama_defaults = OllamaConfig::default();
        let timeout = get("HTTP_TIMEOUT_SECS").and_then(|t| t.parse().ok());

        Self {
            kind,
            openai: OpenAiConfig {
                base_url: get("OPENAI_BASE_URL").unwrap_or(openai_defaults.base_url),
                api_key,
                timeout_secs: timeout.unwrap_or(openai_defaults.timeout_secs),
            },
            ollama: OllamaConfig {
                host: get("OLLAMA_HOST").unwrap_or(ollama_defaults.host),
                port: get("OLLAMA_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(ollama_defaults.port),
                timeout_secs: ollama_defaults.timeout_secs,
            },
        }
    }
}
