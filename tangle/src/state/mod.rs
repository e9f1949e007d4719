//! Conversation state threaded through the chat graph.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A tool invocation requested by the model.
///
/// `arguments` is the raw JSON string from the provider; it is parsed only
/// when the tool node dispatches the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
    pub id: Option<String>,
}

/// Shared state for the chat graph.
///
/// Nodes return partial updates: the configured state updater appends
/// `messages` and replaces `tool_calls` and `resume_value`, so a node only
/// fills in what it produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatState {
    /// Full conversation, chronological, append-only.
    pub messages: Vec<Message>,
    /// Tool calls pending execution for the current round. At most one.
    pub tool_calls: Vec<ToolCall>,
    /// Payload supplied when resuming a suspended tool call. Consumed by
    /// the tool node and cleared afterwards.
    pub resume_value: Option<serde_json::Value>,
}

impl ChatState {
    /// State holding a single user message, the shape of a fresh turn on an
    /// empty thread.
    pub fn from_user_message(content: impl Into<String>) -> Self {
        ChatState {
            messages: vec![Message::user(content)],
            ..Default::default()
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: a fresh turn carries exactly one user message and no
    /// pending tool calls.
    #[test]
    fn from_user_message_is_minimal() {
        let state = ChatState::from_user_message("hello");
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0], Message::user("hello"));
        assert!(state.tool_calls.is_empty());
        assert!(state.resume_value.is_none());
    }

    /// **Scenario**: state round-trips through serde, which the checkpointer
    /// relies on for stored snapshots.
    #[test]
    fn state_serde_round_trip() {
        let mut state = ChatState::from_user_message("hi");
        state.tool_calls.push(ToolCall {
            name: "execute_command".to_string(),
            arguments: r#"{"command":"ls"}"#.to_string(),
            id: None,
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: ChatState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.messages, state.messages);
        assert_eq!(back.tool_calls, state.tool_calls);
    }
}
