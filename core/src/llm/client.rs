//! LLM client trait and request/response structures

use crate::config::ProviderEntry;
use crate::error::{LlmError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::message::ChatMessage;

/// Trait for provider-scoped chat clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Base URL override, `None` when the public default endpoint is used
    fn base_url(&self) -> Option<&str>;
}

/// Builds client handles from provider entries
pub trait ClientFactory: Send + Sync {
    /// Create a new client for the given connection parameters
    fn create(&self, entry: &ProviderEntry) -> Result<Arc<dyn LlmClient>>;
}

/// Request fields that passthrough parameters may not overwrite
const RESERVED_PARAMS: &[&str] = &["model", "messages", "reasoning_effort"];

/// How much reasoning a model should spend before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

/// A chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name/identifier
    pub model: String,

    /// Conversation sent to the model
    pub messages: Vec<ChatMessage>,

    /// Optional reasoning effort hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,

    /// Extra parameters forwarded verbatim (temperature, max_tokens, ...)
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl ChatRequest {
    /// Create a request with no extra parameters
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            reasoning_effort: None,
            params: Map::new(),
        }
    }

    /// Set the reasoning effort hint
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Add a passthrough parameter. Keys naming a typed request field are
    /// ignored so the body never carries them twice.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if RESERVED_PARAMS.contains(&key.as_str()) {
            tracing::warn!("Ignoring passthrough parameter '{}': set it on the request instead", key);
            return self;
        }
        self.params.insert(key, value.into());
        self
    }

    /// Passthrough parameters
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Set the sampling temperature
    pub fn with_temperature(self, temperature: f64) -> Self {
        self.with_param("temperature", temperature)
    }

    /// Set the completion token limit
    pub fn with_max_tokens(self, max_tokens: u32) -> Self {
        self.with_param("max_tokens", max_tokens)
    }
}

/// Response from a chat completion endpoint.
/// Only the fields this crate reads are modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Message carried by a choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Build a response with a single text choice
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// Content of the first choice, exactly as returned
    pub fn first_content(&self, provider: &str) -> Result<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                LlmError::EmptyResponse {
                    provider: provider.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_flattens_params() {
        let request = ChatRequest::new("gpt-4o", vec![ChatMessage::user("hi")])
            .with_temperature(0.5)
            .with_max_tokens(256)
            .with_param("seed", 7);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.5,
                "max_tokens": 256,
                "seed": 7,
            })
        );
    }

    #[test]
    fn test_request_body_includes_reasoning_effort_when_set() {
        let request = ChatRequest::new("o3-mini", vec![ChatMessage::user("hi")])
            .with_reasoning_effort(ReasoningEffort::High);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["reasoning_effort"], "high");
    }

    #[test]
    fn test_temperature_is_sent_as_given() {
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")]).with_temperature(0.3);

        let body = serde_json::to_string(&request).unwrap();
        assert!(body.contains("\"temperature\":0.3"), "{body}");
        assert!(!body.contains("0.30000001"), "{body}");
    }

    #[test]
    fn test_params_cannot_shadow_request_fields() {
        let request = ChatRequest::new("m", vec![])
            .with_param("model", "other")
            .with_param("messages", json!([{"role": "user", "content": "x"}]))
            .with_param("reasoning_effort", "high")
            .with_param("seed", 1);

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"model":"m","messages":[],"seed":1}"#
        );
        assert_eq!(request.params().len(), 1);
    }

    #[test]
    fn test_first_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  first \n"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
        }))
        .unwrap();

        assert_eq!(response.first_content("OPENAI").unwrap(), "  first \n");
    }

    #[test]
    fn test_first_content_missing() {
        let empty = ChatResponse::default();
        assert!(empty.first_content("OPENAI").is_err());

        let null_content: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(matches!(
            null_content.first_content("GEMINI"),
            Err(crate::error::Error::Llm(LlmError::EmptyResponse { .. }))
        ));
    }
}
