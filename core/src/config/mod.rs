//! Provider configuration for llm-bridge core
//!
//! Only exports data types and environment readers.

pub mod types;

pub use types::{
    log_level, normalize_log_level, validate_base_url, LocalModelSettings, Provider, ProviderEntry, ProviderSettings,
};
