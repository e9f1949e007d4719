//! The chat agent: graph wiring, nodes, and the conversational session.

mod chatbot_node;
mod session;
mod tool_node;

pub use chatbot_node::ChatbotNode;
pub use session::{
    ChatExecutor, ChatSession, GraphExecutor, ResumePayload, TurnEvent, TurnInput,
};
pub use tool_node::ToolNode;

use std::collections::HashMap;
use std::sync::Arc;

use crate::channels::{boxed_updater, FieldBasedUpdater};
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::memory::Checkpointer;
use crate::state::ChatState;
use crate::tools::ToolRegistry;

/// Node id of the model-invoking node.
pub const CHATBOT_NODE: &str = "chatbot";
/// Node id of the tool-executing node.
pub const TOOLS_NODE: &str = "tools";

/// Routing decision out of the chatbot node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsConditionResult {
    /// A tool call is pending; go execute it.
    Tools,
    /// Nothing pending; the turn is over.
    End,
}

impl ToolsConditionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolsConditionResult::Tools => TOOLS_NODE,
            ToolsConditionResult::End => END,
        }
    }
}

/// Routes to the tools node when the state carries a pending tool call.
pub fn tools_condition(state: &ChatState) -> ToolsConditionResult {
    if state.tool_calls.is_empty() {
        ToolsConditionResult::End
    } else {
        ToolsConditionResult::Tools
    }
}

/// How node updates merge into the running chat state: messages append,
/// everything else is replaced.
pub(crate) fn apply_chat_update(current: &mut ChatState, update: &ChatState) {
    current.messages.extend(update.messages.iter().cloned());
    current.tool_calls = update.tool_calls.clone();
    current.resume_value = update.resume_value.clone();
}

/// Builds the chat graph:
///
/// ```text
/// START -> chatbot -(tools)-> tools -> chatbot
///                  -(__end__)-> END
/// ```
pub fn build_chat_graph(
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    checkpointer: Arc<dyn Checkpointer<ChatState>>,
) -> Result<CompiledStateGraph<ChatState>, CompilationError> {
    let mut graph =
        StateGraph::new().with_state_updater(boxed_updater(FieldBasedUpdater::new(apply_chat_update)));
    graph.add_node(CHATBOT_NODE, Arc::new(ChatbotNode::new(llm)));
    graph.add_node(TOOLS_NODE, Arc::new(ToolNode::new(tools)));
    graph.add_edge(START, CHATBOT_NODE);
    graph.add_edge(TOOLS_NODE, CHATBOT_NODE);
    let path_map = HashMap::from([
        (
            ToolsConditionResult::Tools.as_str().to_string(),
            TOOLS_NODE.to_string(),
        ),
        (
            ToolsConditionResult::End.as_str().to_string(),
            END.to_string(),
        ),
    ]);
    graph.add_conditional_edges(
        CHATBOT_NODE,
        Arc::new(|state: &ChatState| tools_condition(state).as_str().to_string()),
        Some(path_map),
    );
    graph.compile_with_checkpointer(checkpointer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::llm::MockLlm;
    use crate::memory::MemorySaver;
    use crate::state::ToolCall;
    use crate::tools::TavilySearchTool;

    /// **Scenario**: the condition routes on pending tool calls.
    #[test]
    fn tools_condition_routes_on_pending_calls() {
        let mut state = ChatState::from_user_message("hi");
        assert_eq!(tools_condition(&state), ToolsConditionResult::End);
        state.tool_calls.push(ToolCall {
            name: "execute_command".to_string(),
            arguments: "{}".to_string(),
            id: None,
        });
        assert_eq!(tools_condition(&state), ToolsConditionResult::Tools);
    }

    /// **Scenario**: the merge appends messages and replaces the rest.
    #[test]
    fn chat_update_appends_messages() {
        use crate::message::Message;

        let mut current = ChatState::from_user_message("hi");
        current.tool_calls.push(ToolCall {
            name: "x".to_string(),
            arguments: "{}".to_string(),
            id: None,
        });
        let update = ChatState {
            messages: vec![Message::tool("done", None)],
            tool_calls: Vec::new(),
            resume_value: None,
        };
        apply_chat_update(&mut current, &update);
        assert_eq!(current.messages.len(), 2);
        assert!(current.tool_calls.is_empty());
    }

    /// **Scenario**: the standard wiring compiles.
    #[test]
    fn chat_graph_compiles() {
        let llm = Arc::new(MockLlm::new("hello"));
        let tools = Arc::new(crate::tools::builtin_tools(TavilySearchTool::new("k")));
        let checkpointer: Arc<MemorySaver<ChatState>> = Arc::new(MemorySaver::new());
        assert!(build_chat_graph(llm, tools, checkpointer).is_ok());
    }
}
