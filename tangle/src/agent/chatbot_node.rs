//! Model-invoking node.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::CHATBOT_NODE;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ChatState;

/// Sends the conversation to the model and records its reply.
///
/// The update carries one assistant message and the pending tool call, if
/// any. Responses requesting more than one tool call are rejected.
pub struct ChatbotNode {
    llm: Arc<dyn LlmClient>,
}

impl ChatbotNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        ChatbotNode { llm }
    }
}

#[async_trait]
impl Node<ChatState> for ChatbotNode {
    fn id(&self) -> &str {
        CHATBOT_NODE
    }

    async fn run(&self, state: ChatState) -> Result<(ChatState, Next), AgentError> {
        let response = self.llm.invoke(&state.messages).await?;
        if response.tool_calls.len() > 1 {
            return Err(AgentError::ParallelToolCalls(response.tool_calls.len()));
        }
        let tool_call = response.tool_calls.into_iter().next();
        let message = Message::Assistant {
            content: response.content,
            tool_call: tool_call.clone(),
        };
        let update = ChatState {
            messages: vec![message],
            tool_calls: tool_call.into_iter().collect(),
            resume_value: state.resume_value.clone(),
        };
        Ok((update, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::llm::{LlmResponse, MockLlm};
    use crate::state::ToolCall;

    fn call(name: &str) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            arguments: "{}".to_string(),
            id: Some("call_1".to_string()),
        }
    }

    /// **Scenario**: a plain answer becomes one assistant message with no
    /// pending tool calls.
    #[tokio::test]
    async fn plain_answer_has_no_tool_calls() {
        let node = ChatbotNode::new(Arc::new(MockLlm::new("hello there")));
        let (update, next) = node
            .run(ChatState::from_user_message("hi"))
            .await
            .unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(update.messages.len(), 1);
        assert_eq!(update.messages[0], Message::assistant("hello there"));
        assert!(update.tool_calls.is_empty());
    }

    /// **Scenario**: a response with one tool call records it both on the
    /// assistant message and as the pending call.
    #[tokio::test]
    async fn tool_call_is_recorded() {
        let node = ChatbotNode::new(Arc::new(MockLlm::scripted(vec![
            LlmResponse::with_tool_call("", call("execute_command")),
        ])));
        let (update, _) = node
            .run(ChatState::from_user_message("run ls"))
            .await
            .unwrap();
        assert_eq!(update.tool_calls.len(), 1);
        assert_eq!(update.tool_calls[0].name, "execute_command");
        match &update.messages[0] {
            Message::Assistant { tool_call: Some(tc), .. } => {
                assert_eq!(tc.name, "execute_command");
            }
            other => panic!("expected assistant message with call, got {:?}", other),
        }
    }

    /// **Scenario**: more than one tool call in a response is rejected.
    #[tokio::test]
    async fn parallel_tool_calls_are_rejected() {
        let response = LlmResponse {
            content: String::new(),
            tool_calls: vec![call("a"), call("b")],
        };
        let node = ChatbotNode::new(Arc::new(MockLlm::scripted(vec![response])));
        match node.run(ChatState::from_user_message("hi")).await {
            Err(AgentError::ParallelToolCalls(n)) => assert_eq!(n, 2),
            other => panic!("expected ParallelToolCalls, got {:?}", other),
        }
    }
}
