//! Provider client implementations

pub mod openai;

pub use openai::{OpenAiCompatClient, OpenAiCompatFactory};
