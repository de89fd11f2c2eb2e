//! Chat-completion transport used by the issue analyzer.
//!
//! Exposes the provider-neutral request/response types, the `LlmClient`
//! seam, and an OpenAI-compatible client.
mod openai;
mod types;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{
    ChatRequest, ChatResponse, ChatUsage, LlmClient, Message, MessageRole, TriageAiError,
};
