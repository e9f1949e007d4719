//! Conversation messages exchanged with the model.

use serde::{Deserialize, Serialize};

use crate::state::ToolCall;

/// One message in a conversation, in chronological order within
/// `ChatState::messages`.
///
/// An assistant message carries at most one tool call; the chatbot node
/// rejects model responses that request more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System instruction, usually first.
    System(String),
    /// End-user input.
    User(String),
    /// Model output, optionally requesting a tool call.
    Assistant {
        content: String,
        tool_call: Option<ToolCall>,
    },
    /// Result of a tool execution, linked back by the provider call id.
    Tool {
        content: String,
        call_id: Option<String>,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User(content.into())
    }

    /// Assistant message with no tool call.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
            tool_call: None,
        }
    }

    pub fn assistant_with_call(content: impl Into<String>, call: ToolCall) -> Self {
        Message::Assistant {
            content: content.into(),
            tool_call: Some(call),
        }
    }

    pub fn tool(content: impl Into<String>, call_id: Option<String>) -> Self {
        Message::Tool {
            content: content.into(),
            call_id,
        }
    }

    /// Text content of the message, whatever the role.
    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) => s,
            Message::Assistant { content, .. } | Message::Tool { content, .. } => content,
        }
    }

    /// Role label for display and logging.
    pub fn role(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::User(_) => "user",
            Message::Assistant { .. } => "assistant",
            Message::Tool { .. } => "tool",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors fill the expected variants and `content()`
    /// returns the text regardless of role.
    #[test]
    fn constructors_and_content() {
        let call = ToolCall {
            name: "search".to_string(),
            arguments: "{}".to_string(),
            id: Some("call_1".to_string()),
        };
        let messages = vec![
            Message::system("be brief"),
            Message::user("hi"),
            Message::assistant_with_call("looking that up", call),
            Message::tool("result text", Some("call_1".to_string())),
        ];
        let contents: Vec<&str> = messages.iter().map(|m| m.content()).collect();
        assert_eq!(
            contents,
            vec!["be brief", "hi", "looking that up", "result text"]
        );
        assert_eq!(messages[2].role(), "assistant");
        assert_eq!(messages[3].role(), "tool");
    }

    /// **Scenario**: a plain assistant message has no tool call attached.
    #[test]
    fn assistant_without_call() {
        match Message::assistant("done") {
            Message::Assistant { tool_call, .. } => assert!(tool_call.is_none()),
            other => panic!("expected Assistant, got {:?}", other),
        }
    }
}
