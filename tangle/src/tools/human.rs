//! Human-in-the-loop assistance tool.
//!
//! The first call suspends the graph with the model's query; the operator's
//! answer comes back through the call context on resume.

use async_trait::async_trait;

use crate::tools::{Tool, ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// Tool name: ask a human for guidance.
pub const TOOL_HUMAN_ASSISTANCE: &str = "human_assistance";

/// Pauses the run until a human supplies an answer.
#[derive(Debug, Default)]
pub struct HumanAssistanceTool;

impl HumanAssistanceTool {
    pub fn new() -> Self {
        HumanAssistanceTool
    }
}

#[async_trait]
impl Tool for HumanAssistanceTool {
    fn name(&self) -> &str {
        TOOL_HUMAN_ASSISTANCE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_HUMAN_ASSISTANCE.to_string(),
            description: Some(
                "Request assistance from a human operator. \
                 Use when you need expert guidance or approval before proceeding."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Question for the human operator"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let query = args.get("query").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolSourceError::InvalidInput("expected a string field `query`".to_string())
        })?;

        match ctx.and_then(|c| c.resume.as_ref()) {
            Some(resume) => {
                let data = resume.get("data").and_then(|v| v.as_str()).ok_or_else(|| {
                    ToolSourceError::InvalidInput("resume payload missing `data`".to_string())
                })?;
                Ok(ToolCallContent {
                    text: data.to_string(),
                })
            }
            None => Err(ToolSourceError::Suspended(
                serde_json::json!({ "query": query }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: without a resume value the call suspends, carrying the
    /// query in the payload.
    #[tokio::test]
    async fn first_call_suspends_with_query() {
        let tool = HumanAssistanceTool::new();
        match tool
            .call(serde_json::json!({"query": "need expert advice"}), None)
            .await
        {
            Err(ToolSourceError::Suspended(payload)) => {
                assert_eq!(payload["query"], "need expert advice");
            }
            other => panic!("expected Suspended, got {:?}", other.map(|c| c.text)),
        }
    }

    /// **Scenario**: with a resume value the human's answer becomes the
    /// tool result.
    #[tokio::test]
    async fn resume_returns_the_answer() {
        let tool = HumanAssistanceTool::new();
        let ctx = ToolCallContext::with_resume(serde_json::json!({"data": "use tokio"}));
        let content = tool
            .call(serde_json::json!({"query": "which runtime?"}), Some(&ctx))
            .await
            .unwrap();
        assert_eq!(content.text, "use tokio");
    }

    /// **Scenario**: a resume payload without `data` is invalid input, not
    /// a second suspension.
    #[tokio::test]
    async fn resume_without_data_is_invalid() {
        let tool = HumanAssistanceTool::new();
        let ctx = ToolCallContext::with_resume(serde_json::json!({"answer": "nope"}));
        match tool
            .call(serde_json::json!({"query": "q"}), Some(&ctx))
            .await
        {
            Err(ToolSourceError::InvalidInput(msg)) => assert!(msg.contains("data")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|c| c.text)),
        }
    }

    /// **Scenario**: a call without a query is rejected.
    #[tokio::test]
    async fn missing_query_is_invalid_input() {
        let tool = HumanAssistanceTool::new();
        match tool.call(serde_json::json!({}), None).await {
            Err(ToolSourceError::InvalidInput(msg)) => assert!(msg.contains("query")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|c| c.text)),
        }
    }
}
