//! LLM client abstractions and implementations

pub mod client;
pub mod message;
pub mod providers;

pub use client::{
    ChatRequest, ChatResponse, Choice, ClientFactory, LlmClient, ReasoningEffort, ResponseMessage,
};
pub use message::{ChatMessage, MessageRole};
pub use providers::*;
