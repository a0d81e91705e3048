//! Provider configuration types
//!
//! Settings are read from the environment once and then handed to the
//! connection layer as plain values.

use crate::error::{ConfigError, LlmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default endpoint for OpenAI when no base URL override is set
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anthropic's OpenAI-compatible endpoint
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1/";

/// Local Ollama server
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

/// Gemini's OpenAI-compatible endpoint
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

/// Ollama ignores the key but OpenAI-compatible clients expect one
const OLLAMA_API_KEY: &str = "ollama";

/// Supported chat providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    /// OpenAI (default public endpoint)
    OpenAi,
    /// Anthropic through its OpenAI-compatible endpoint
    Anthropic,
    /// Local Ollama server
    Ollama,
    /// Google Gemini through its OpenAI-compatible endpoint
    Gemini,
}

impl Provider {
    /// Every supported provider, in registry order
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Ollama,
        Provider::Gemini,
    ];

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI",
            Provider::Anthropic => "ANTHROPIC",
            Provider::Ollama => "OLLAMA",
            Provider::Gemini => "GEMINI",
        }
    }

    /// Canonical identifiers of every supported provider
    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(Provider::as_str).collect()
    }

    /// Base URL the provider is reached at unless overridden.
    /// `None` means the client library default (OpenAI's public API).
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => None,
            Provider::Anthropic => Some(ANTHROPIC_BASE_URL),
            Provider::Ollama => Some(OLLAMA_BASE_URL),
            Provider::Gemini => Some(GEMINI_BASE_URL),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Provider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == normalized)
            .ok_or_else(|| LlmError::UnsupportedProvider {
                provider: normalized,
                allowed: Provider::allowed(),
            })
    }
}

/// Connection parameters for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Provider this entry belongs to
    pub provider: Provider,

    /// API key for authentication
    pub api_key: Option<String>,

    /// Custom base URL, `None` for the public default
    pub base_url: Option<String>,
}

impl ProviderEntry {
    /// Create an entry with the provider's default base URL
    pub fn new(provider: Provider, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            base_url: provider.default_base_url().map(str::to_string),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL, rejecting anything that is not http(s)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        self.base_url = Some(base_url);
        Ok(self)
    }

    /// Base URL requests are sent to
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_DEFAULT_BASE_URL)
    }
}

/// Check that a base URL parses and uses http or https
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let invalid = || ConfigError::InvalidValue {
        field: "base_url".to_string(),
        value: base_url.to_string(),
    };

    let parsed = url::Url::parse(base_url).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid().into()),
    }
}

/// Credentials and endpoints for every supported provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub openai: ProviderEntry,
    pub anthropic: ProviderEntry,
    pub ollama: ProviderEntry,
    pub gemini: ProviderEntry,
}

impl ProviderSettings {
    /// Build settings from explicit keys
    pub fn new(
        openai_api_key: Option<String>,
        anthropic_api_key: Option<String>,
        google_api_key: Option<String>,
    ) -> Self {
        Self {
            openai: ProviderEntry::new(Provider::OpenAi, openai_api_key),
            anthropic: ProviderEntry::new(Provider::Anthropic, anthropic_api_key),
            ollama: ProviderEntry::new(Provider::Ollama, Some(OLLAMA_API_KEY.to_string())),
            gemini: ProviderEntry::new(Provider::Gemini, google_api_key),
        }
    }

    /// Read `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` and `GOOGLE_API_KEY`
    pub fn from_env() -> Self {
        Self::new(
            env_var("OPENAI_API_KEY"),
            env_var("ANTHROPIC_API_KEY"),
            env_var("GOOGLE_API_KEY"),
        )
    }

    /// Entry for a provider
    pub fn entry(&self, provider: Provider) -> &ProviderEntry {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Anthropic => &self.anthropic,
            Provider::Ollama => &self.ollama,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Replace the entry for its provider
    pub fn with_entry(mut self, entry: ProviderEntry) -> Self {
        match entry.provider {
            Provider::OpenAi => self.openai = entry,
            Provider::Anthropic => self.anthropic = entry,
            Provider::Ollama => self.ollama = entry,
            Provider::Gemini => self.gemini = entry,
        }
        self
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Settings for the local model used by the single-model helper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalModelSettings {
    /// Model name served locally (`OLLAMA_GPT_MODEL`)
    pub local_model: Option<String>,

    /// Local endpoint (`OLLAMA_BASE_URL`)
    pub base_url: Option<String>,

    /// Local credential (`OLLAMA_API_KEY`)
    pub api_key: Option<String>,

    /// Key for the default OpenAI client (`OPENAI_API_KEY`)
    pub openai_api_key: Option<String>,
}

impl LocalModelSettings {
    pub fn from_env() -> Self {
        Self {
            local_model: env_var("OLLAMA_GPT_MODEL"),
            base_url: env_var("OLLAMA_BASE_URL"),
            api_key: env_var("OLLAMA_API_KEY"),
            openai_api_key: env_var("OPENAI_API_KEY"),
        }
    }

    /// Whether `model` is the configured local model
    pub fn is_local_model(&self, model: &str) -> bool {
        self.local_model.as_deref() == Some(model)
    }
}

/// Log level from `LOG_LEVEL` as a tracing directive, defaulting to `info`
pub fn log_level() -> String {
    env_var("LOG_LEVEL")
        .map(|level| normalize_log_level(&level))
        .unwrap_or_else(|| "info".to_string())
}

/// Map Python-style level names onto tracing levels
pub fn normalize_log_level(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        other => other.to_string(),
    }
}

/// Read a non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
