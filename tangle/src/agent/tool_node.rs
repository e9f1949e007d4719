//! Tool-executing node.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::TOOLS_NODE;
use crate::error::AgentError;
use crate::graph::{GraphInterrupt, Interrupt, Next, Node};
use crate::message::Message;
use crate::state::ChatState;
use crate::tools::{ToolCallContext, ToolRegistry, ToolSourceError};

/// Executes the single pending tool call and appends its result.
///
/// Tool failures are folded into the tool message text so the model can
/// react; only suspension escapes as a graph interrupt.
pub struct ToolNode {
    tools: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        ToolNode { tools }
    }
}

fn parse_arguments(raw: &str) -> Result<serde_json::Value, String> {
    if raw.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(raw).map_err(|e| format!("invalid tool arguments: {}", e))
}

#[async_trait]
impl Node<ChatState> for ToolNode {
    fn id(&self) -> &str {
        TOOLS_NODE
    }

    async fn run(&self, state: ChatState) -> Result<(ChatState, Next), AgentError> {
        let call = state.tool_calls.first().cloned().ok_or_else(|| {
            AgentError::ExecutionFailed("tool node reached with no pending tool call".to_string())
        })?;

        let text = match parse_arguments(&call.arguments) {
            Err(reason) => format!("Error: {}", reason),
            Ok(args) => {
                let ctx = state.resume_value.clone().map(ToolCallContext::with_resume);
                match self.tools.call(&call.name, args, ctx.as_ref()).await {
                    Ok(content) => content.text,
                    Err(ToolSourceError::Suspended(payload)) => {
                        return Err(GraphInterrupt::from(Interrupt::new(payload)).into());
                    }
                    Err(err) => format!("Error: {}", err),
                }
            }
        };

        let update = ChatState {
            messages: vec![Message::tool(text, call.id.clone())],
            tool_calls: Vec::new(),
            resume_value: None,
        };
        Ok((update, Next::Continue))
    }
}
