//! OpenAI chat-completions client.
//!
//! Reads `OPENAI_API_KEY` (and optionally `OPENAI_BASE_URL`) from the
//! environment through async-openai's default config.

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionMessageToolCalls, ChatCompletionRequestAssistantMessage,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
    ChatCompletionTools, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    FunctionObject, ToolChoiceOptions,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

/// Chat-completions client with optional tool binding.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    pub fn new(model: impl Into<String>) -> Self {
        ChatOpenAI {
            client: Client::new(),
            model: model.into(),
            tools: None,
            temperature: None,
        }
    }

    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        ChatOpenAI {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
        }
    }

    /// Binds tool specs so the model can request tool calls.
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest, AgentError> {
        let request_messages: Vec<ChatCompletionRequestMessage> =
            messages.iter().map(to_request_message).collect();

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages(request_messages);
        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }
        if let Some(specs) = &self.tools {
            let tools: Vec<ChatCompletionTools> = specs
                .iter()
                .map(|spec| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: spec.name.clone(),
                            description: spec.description.clone(),
                            parameters: Some(spec.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            builder.tools(tools);
            builder.tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
        }
        builder
            .build()
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e)))
    }
}

fn to_request_message(message: &Message) -> ChatCompletionRequestMessage {
    match message {
        Message::System(content) => {
            ChatCompletionRequestSystemMessage::from(content.as_str()).into()
        }
        Message::User(content) => ChatCompletionRequestUserMessage::from(content.as_str()).into(),
        Message::Assistant { content, .. } => {
            let msg: ChatCompletionRequestAssistantMessage = content.as_str().into();
            msg.into()
        }
        // Tool results are folded in as user text; this client does not
        // carry the call-id plumbing a tool-role message requires.
        Message::Tool { content, .. } => {
            ChatCompletionRequestUserMessage::from(format!("Tool result: {}", content).as_str())
                .into()
        }
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let request = self.build_request(messages)?;
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "sending chat completion request"
        );
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ExecutionFailed("OpenAI returned no choices".to_string()))?;

        let content = choice.message.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tool_call| match tool_call {
                ChatCompletionMessageToolCalls::Function(call) => Some(ToolCall {
                    name: call.function.name,
                    arguments: call.function.arguments,
                    id: Some(call.id),
                }),
                _ => None,
            })
            .collect();
        tracing::trace!(tool_calls = tool_calls.len(), "chat completion received");
        Ok(LlmResponse { content, tool_calls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the request carries the model, all messages, and the
    /// bound tool specs.
    #[test]
    fn build_request_includes_model_messages_and_tools() {
        let spec = ToolSpec {
            name: "execute_command".to_string(),
            description: Some("Run a shell command".to_string()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": { "command": { "type": "string" } },
                "required": ["command"]
            }),
        };
        let client = ChatOpenAI::new("gpt-4o-mini").with_tools(vec![spec]);
        let request = client
            .build_request(&[
                Message::system("be brief"),
                Message::user("list files"),
                Message::tool("ok", None),
            ])
            .unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.tools.as_ref().map(Vec::len), Some(1));
    }
}
