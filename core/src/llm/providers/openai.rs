//! OpenAI-compatible chat client
//!
//! OpenAI, Anthropic, Ollama and Gemini all expose an OpenAI-style
//! `/chat/completions` endpoint, so one client type serves every provider.

use crate::config::ProviderEntry;
use crate::error::{LlmError, Result};
use crate::llm::{ChatRequest, ChatResponse, ClientFactory, LlmClient};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Chat client for one OpenAI-compatible endpoint
#[derive(Debug)]
pub struct OpenAiCompatClient {
    client: Client,
    entry: ProviderEntry,
}

impl OpenAiCompatClient {
    /// Create a new client from a provider entry
    pub fn new(entry: &ProviderEntry) -> Self {
        Self {
            client: Client::new(),
            entry: entry.clone(),
        }
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.entry.effective_base_url().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            "{} request to {} with model {}",
            self.entry.provider,
            self.completions_url(),
            request.model
        );

        let mut builder = self
            .client
            .post(self.completions_url())
            .header("content-type", "application/json")
            .json(request);

        if let Some(api_key) = &self.entry.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("{} API call failed: {} - {}", self.entry.provider, status, error_text);
            return Err(LlmError::ApiError {
                status,
                message: error_text,
            }
            .into());
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn provider_name(&self) -> &str {
        self.entry.provider.as_str()
    }

    fn base_url(&self) -> Option<&str> {
        self.entry.base_url.as_deref()
    }
}

/// Factory producing [`OpenAiCompatClient`] handles
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiCompatFactory;

impl ClientFactory for OpenAiCompatFactory {
    fn create(&self, entry: &ProviderEntry) -> Result<Arc<dyn LlmClient>> {
        Ok(Arc::new(OpenAiCompatClient::new(entry)))
    }
}
