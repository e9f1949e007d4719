//! Tavily web search tool.

use async_trait::async_trait;

use crate::tools::{Tool, ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// Tool name: web search via the Tavily API.
pub const TOOL_TAVILY_SEARCH: &str = "tavily_search";

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Web search backed by Tavily.
pub struct TavilySearchTool {
    client: reqwest::Client,
    api_key: String,
    max_results: usize,
}

impl TavilySearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        TavilySearchTool {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            max_results: 2,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Flattens a Tavily response into numbered title/url/snippet lines.
fn format_results(value: &serde_json::Value) -> String {
    let results = value
        .get("results")
        .and_then(|r| r.as_array())
        .filter(|items| !items.is_empty());
    let Some(items) = results else {
        return "No results found.".to_string();
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let title = item.get("title").and_then(|v| v.as_str()).unwrap_or("(untitled)");
            let url = item.get("url").and_then(|v| v.as_str()).unwrap_or("");
            let content = item.get("content").and_then(|v| v.as_str()).unwrap_or("");
            format!("{}. {}\n   {}\n   {}", i + 1, title, url, content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        TOOL_TAVILY_SEARCH
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_TAVILY_SEARCH.to_string(),
            description: Some(
                "Search the web for current information. \
                 Use when the answer depends on facts you may not know."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        _ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let query = args.get("query").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolSourceError::InvalidInput("expected a string field `query`".to_string())
        })?;
        tracing::debug!(query = %query, "searching the web");

        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": self.max_results,
        });
        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;

        Ok(ToolCallContent {
            text: format_results(&value),
        })
    }
}
