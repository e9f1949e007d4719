//! Scripted model client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Test double that replays a script of responses.
///
/// Scripted responses are consumed in order; once exhausted, the fallback
/// response is returned for every further call.
pub struct MockLlm {
    script: Mutex<VecDeque<LlmResponse>>,
    fallback: LlmResponse,
}

impl MockLlm {
    /// Always answers with the same text, no tool calls.
    pub fn new(content: impl Into<String>) -> Self {
        MockLlm {
            script: Mutex::new(VecDeque::new()),
            fallback: LlmResponse::text(content),
        }
    }

    /// Replays `responses` in order, then falls back to an empty answer.
    pub fn scripted(responses: Vec<LlmResponse>) -> Self {
        MockLlm {
            script: Mutex::new(responses.into()),
            fallback: LlmResponse::text(""),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| AgentError::ExecutionFailed("mock script lock poisoned".to_string()))?;
        Ok(script.pop_front().unwrap_or_else(|| self.fallback.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state::ToolCall;

    /// **Scenario**: scripted responses come back in order, then the
    /// fallback repeats.
    #[tokio::test]
    async fn scripted_responses_replay_in_order() {
        let call = ToolCall {
            name: "execute_command".to_string(),
            arguments: r#"{"command":"ls"}"#.to_string(),
            id: Some("call_1".to_string()),
        };
        let mock = MockLlm::scripted(vec![
            LlmResponse::with_tool_call("", call),
            LlmResponse::text("all done"),
        ]);

        let first = mock.invoke(&[]).await.unwrap();
        assert_eq!(first.tool_calls.len(), 1);
        let second = mock.invoke(&[]).await.unwrap();
        assert_eq!(second.content, "all done");
        let third = mock.invoke(&[]).await.unwrap();
        assert_eq!(third.content, "");
        assert!(third.tool_calls.is_empty());
    }
}
