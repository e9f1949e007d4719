//! Chat model clients.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

/// One model response: text plus any requested tool calls.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        LlmResponse {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_call(content: impl Into<String>, call: ToolCall) -> Self {
        LlmResponse {
            content: content.into(),
            tool_calls: vec![call],
        }
    }
}

/// A chat model that turns a conversation into a response.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
