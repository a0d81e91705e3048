//! Error types and handling for llm-bridge core

use thiserror::Error;

/// Result type alias for llm-bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for llm-bridge core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `.env` file errors
    #[error("Environment file error: {0}")]
    Env(#[from] dotenvy::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Unsupported provider '{provider}'. Allowed: {allowed:?}")]
    UnsupportedProvider {
        provider: String,
        allowed: Vec<&'static str>,
    },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Empty response from provider: {provider}")]
    EmptyResponse { provider: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_lists_allowed_set() {
        let err: Error = LlmError::UnsupportedProvider {
            provider: "MISTRAL".to_string(),
            allowed: vec!["OPENAI", "ANTHROPIC", "OLLAMA", "GEMINI"],
        }
        .into();

        let message = err.to_string();
        assert!(message.contains("MISTRAL"));
        assert!(message.contains("\"OPENAI\", \"ANTHROPIC\", \"OLLAMA\", \"GEMINI\""));
    }
}
