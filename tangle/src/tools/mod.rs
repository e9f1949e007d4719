//! Tools callable by the model, and the registry that dispatches them.

mod human;
mod registry;
mod search;
mod shell;

pub use human::{HumanAssistanceTool, TOOL_HUMAN_ASSISTANCE};
pub use registry::{builtin_tools, ToolRegistry};
pub use search::{TavilySearchTool, TOOL_TAVILY_SEARCH};
pub use shell::{ExecuteCommandTool, TOOL_EXECUTE_COMMAND};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Description of a tool as advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema for the tool's arguments.
    pub input_schema: serde_json::Value,
}

/// Text result of a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    pub text: String,
}

/// Per-call context handed to tools.
///
/// Carries the resume payload when a previously suspended call is being
/// replayed.
#[derive(Debug, Clone, Default)]
pub struct ToolCallContext {
    pub resume: Option<serde_json::Value>,
}

impl ToolCallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resume(resume: serde_json::Value) -> Self {
        ToolCallContext {
            resume: Some(resume),
        }
    }
}

/// Errors a tool can raise.
#[derive(Debug, thiserror::Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidInput(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// The tool needs external input; the payload describes what it needs.
    /// The graph turns this into an interrupt.
    #[error("tool suspended awaiting external input")]
    Suspended(serde_json::Value),
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    async fn call(
        &self,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
