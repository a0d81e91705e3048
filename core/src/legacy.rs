//! Single-model helper
//!
//! Picks the local endpoint for the configured local model and the default
//! OpenAI client for everything else. Clients are not cached here; use
//! [`crate::ModelConnection`] when reuse matters.

use crate::config::{LocalModelSettings, Provider, ProviderEntry};
use crate::error::Result;
use crate::llm::{ChatMessage, ChatRequest, ClientFactory, LlmClient, OpenAiCompatFactory};
use std::sync::Arc;

/// Client selection for the single-model path
pub struct LegacyClient {
    settings: LocalModelSettings,
    factory: Arc<dyn ClientFactory>,
}

impl LegacyClient {
    /// Create a helper using the OpenAI-compatible HTTP client
    pub fn new(settings: LocalModelSettings) -> Self {
        Self::with_factory(settings, Arc::new(OpenAiCompatFactory))
    }

    /// Create a helper that builds clients through `factory`
    pub fn with_factory(settings: LocalModelSettings, factory: Arc<dyn ClientFactory>) -> Self {
        Self { settings, factory }
    }

    /// Read `OLLAMA_GPT_MODEL`, `OLLAMA_BASE_URL`, `OLLAMA_API_KEY` and
    /// `OPENAI_API_KEY`
    pub fn from_env() -> Self {
        Self::new(LocalModelSettings::from_env())
    }

    /// Return a client for `model_name` served by `provider_name`.
    ///
    /// Only `ollama` together with the configured local model gets the local
    /// endpoint. Every other supported provider gets the default OpenAI
    /// client; unknown provider names are rejected.
    pub async fn get_llm_client(
        &self,
        model_name: &str,
        provider_name: &str,
    ) -> Result<Arc<dyn LlmClient>> {
        let provider: Provider = provider_name.parse()?;

        let entry = if provider == Provider::Ollama && self.settings.is_local_model(model_name) {
            self.local_entry()?
        } else {
            ProviderEntry::new(Provider::OpenAi, self.settings.openai_api_key.clone())
        };

        self.factory.create(&entry)
    }

    /// Local endpoint, falling back to the default Ollama address
    fn local_entry(&self) -> Result<ProviderEntry> {
        let entry = ProviderEntry::new(Provider::Ollama, self.settings.api_key.clone());
        match &self.settings.base_url {
            Some(base_url) => entry.with_base_url(base_url.as_str()),
            None => Ok(entry),
        }
    }

    /// Send `messages` with an explicit temperature and return the first
    /// choice's text as-is
    pub async fn get_chat_response(
        &self,
        messages: Vec<ChatMessage>,
        client: &dyn LlmClient,
        model_name: &str,
        temperature: f64,
    ) -> Result<String> {
        let request = ChatRequest::new(model_name, messages).with_temperature(temperature);

        tracing::info!("Getting LLM response");
        let response = client.chat_completion(&request).await?;
        tracing::info!("Got LLM response");

        Ok(response.first_content(client.provider_name())?.to_string())
    }
}
