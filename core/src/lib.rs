//! # llm-bridge Core
//!
//! Core library for llm-bridge - one client abstraction over several
//! OpenAI-compatible chat providers.
//!
//! This library provides a provider registry with a per-provider client
//! cache, a chat dispatcher returning the first completion's text, a
//! single-model helper for local models, and a project bootstrap that finds
//! the project root and loads its `.env` file.

// Core modules
pub mod bootstrap;
pub mod config;
pub mod connection;
pub mod error;
pub mod legacy;
pub mod llm;

// Re-export commonly used types
pub use bootstrap::{setup_project, ProjectRoot, SearchPaths, DEFAULT_ROOT_MARKERS};
pub use config::{LocalModelSettings, Provider, ProviderEntry, ProviderSettings};
pub use connection::ModelConnection;
pub use error::{Error, Result};
pub use legacy::LegacyClient;
pub use llm::{ChatMessage, ChatRequest, LlmClient, MessageRole, ReasoningEffort};

/// Current version of the llm-bridge-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with the level from `LOG_LEVEL` (default `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config::log_level()))
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
