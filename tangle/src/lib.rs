//! Tangle: a graph-based chatbot core.
//!
//! The crate has two layers:
//!
//! - a small graph-execution core ([`graph`], [`channels`], [`memory`],
//!   [`stream`]): build a [`graph::StateGraph`], compile it, then invoke
//!   or stream it with per-thread checkpointing and interrupts;
//! - the chat agent on top ([`agent`], [`llm`], [`tools`]): a chatbot node
//!   and a tool node wired into a loop, three built-in tools, and a
//!   [`agent::ChatSession`] that handles suspend/resume across turns.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tangle::agent::{build_chat_graph, ChatSession, GraphExecutor};
//! use tangle::llm::ChatOpenAI;
//! use tangle::memory::MemorySaver;
//! use tangle::state::ChatState;
//! use tangle::tools::{builtin_tools, TavilySearchTool};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let tools = Arc::new(builtin_tools(TavilySearchTool::new("tavily-key")));
//! let llm = Arc::new(ChatOpenAI::new("gpt-4o-mini").with_tools(tools.list()));
//! let checkpointer: Arc<MemorySaver<ChatState>> = Arc::new(MemorySaver::new());
//! let graph = build_chat_graph(llm, tools, checkpointer.clone())?;
//! let executor = Arc::new(GraphExecutor::new(graph, checkpointer, "1"));
//! let mut session = ChatSession::new(executor);
//! let _events = session.turn("hello").await?;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channels;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod state;
pub mod stream;
pub mod tools;

pub use error::AgentError;
pub use message::Message;
pub use state::{ChatState, ToolCall};
