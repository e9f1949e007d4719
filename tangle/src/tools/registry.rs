//! Ordered tool registry.

use crate::tools::{
    ExecuteCommandTool, HumanAssistanceTool, TavilySearchTool, Tool, ToolCallContent,
    ToolCallContext, ToolSourceError, ToolSpec,
};

/// Holds tools in registration order and dispatches calls by name.
///
/// Order matters: the specs are advertised to the model in the order the
/// tools were registered.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry { tools: Vec::new() }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Specs for all registered tools, in registration order.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tracing::debug!(tool = %name, "dispatching tool call");
        tool.call(args, ctx).await
    }
}

/// The fixed tool set of the chat agent: web search, human assistance,
/// shell execution. Adding a tool means adding it here.
pub fn builtin_tools(search: TavilySearchTool) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(search));
    registry.register(Box::new(HumanAssistanceTool::new()));
    registry.register(Box::new(ExecuteCommandTool::new()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::tools::{TOOL_EXECUTE_COMMAND, TOOL_HUMAN_ASSISTANCE, TOOL_TAVILY_SEARCH};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo".to_string(),
                description: Some("echoes its arguments".to_string()),
                input_schema: serde_json::json!({"type": "object"}),
            }
        }

        async fn call(
            &self,
            args: serde_json::Value,
            _ctx: Option<&ToolCallContext>,
        ) -> Result<ToolCallContent, ToolSourceError> {
            Ok(ToolCallContent {
                text: args.to_string(),
            })
        }
    }

    /// **Scenario**: the built-in set keeps its registration order.
    #[test]
    fn builtin_tools_are_ordered() {
        let registry = builtin_tools(TavilySearchTool::new("test-key"));
        assert_eq!(
            registry.names(),
            vec![TOOL_TAVILY_SEARCH, TOOL_HUMAN_ASSISTANCE, TOOL_EXECUTE_COMMAND]
        );
        assert_eq!(registry.list().len(), 3);
    }

    /// **Scenario**: dispatch reaches the named tool; unknown names fail
    /// with NotFound.
    #[tokio::test]
    async fn dispatch_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let content = registry
            .call("echo", serde_json::json!({"x": 1}), None)
            .await
            .unwrap();
        assert!(content.text.contains("\"x\":1"));

        match registry.call("ghost", serde_json::json!({}), None).await {
            Err(ToolSourceError::NotFound(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected NotFound, got {:?}", other.map(|c| c.text)),
        }
    }
}
