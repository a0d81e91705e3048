//! Provider registry, client cache and chat dispatch
//!
//! [`ModelConnection`] maps a provider name to its connection parameters,
//! builds one client per provider on first use and reuses it afterwards.

use crate::config::{Provider, ProviderEntry, ProviderSettings};
use crate::error::Result;
use crate::llm::{ChatMessage, ChatRequest, ClientFactory, LlmClient, OpenAiCompatFactory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Unified connection handler for every supported provider
pub struct ModelConnection {
    settings: ProviderSettings,
    factory: Arc<dyn ClientFactory>,
    clients: Mutex<HashMap<Provider, Arc<dyn LlmClient>>>,
}

impl ModelConnection {
    /// Create a connection using the OpenAI-compatible HTTP client
    pub fn new(settings: ProviderSettings) -> Self {
        Self::with_factory(settings, Arc::new(OpenAiCompatFactory))
    }

    /// Create a connection that builds clients through `factory`
    pub fn with_factory(settings: ProviderSettings, factory: Arc<dyn ClientFactory>) -> Self {
        let connection = Self {
            settings,
            factory,
            clients: Mutex::new(HashMap::new()),
        };
        connection.log_credentials();
        connection
    }

    /// Load `.env` (overriding existing variables) and read provider keys
    pub fn from_env() -> Self {
        match dotenvy::dotenv_override() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }
        Self::new(ProviderSettings::from_env())
    }

    fn log_credentials(&self) {
        let mark = |entry: &ProviderEntry| if entry.api_key.is_some() { "✅" } else { "❌" };
        tracing::info!("🔹 OpenAI API key loaded: {}", mark(&self.settings.openai));
        tracing::info!(
            "🔹 Anthropic API key loaded: {} (optional)",
            mark(&self.settings.anthropic)
        );
        tracing::info!(
            "🔹 Google API key loaded: {} (optional)",
            mark(&self.settings.gemini)
        );
    }

    /// Configured entries for every provider
    pub fn providers(&self) -> Vec<&ProviderEntry> {
        Provider::ALL
            .iter()
            .map(|provider| self.settings.entry(*provider))
            .collect()
    }

    /// Connection parameters for one provider
    pub fn entry(&self, provider: Provider) -> &ProviderEntry {
        self.settings.entry(provider)
    }

    /// Return the cached client for `provider`, creating it on first use.
    /// The provider name is matched case-insensitively.
    pub fn client(&self, provider: &str) -> Result<Arc<dyn LlmClient>> {
        let provider: Provider = provider.parse()?;

        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(&provider) {
            return Ok(Arc::clone(client));
        }

        tracing::debug!("Creating client for {}", provider);
        let client = self.factory.create(self.settings.entry(provider))?;
        clients.insert(provider, Arc::clone(&client));
        Ok(client)
    }

    /// Send one chat completion to `provider` and return the first choice's
    /// text with surrounding whitespace removed
    pub async fn send_chat(&self, provider: &str, request: ChatRequest) -> Result<String> {
        let client = self.client(provider)?;
        let response = client.chat_completion(&request).await?;
        let content = response.first_content(client.provider_name())?;
        Ok(content.trim().to_string())
    }

    /// Ask a single question as a user message
    pub async fn ask(&self, provider: &str, model: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(model, vec![ChatMessage::user(prompt)]);
        self.send_chat(provider, request).await
    }
}
