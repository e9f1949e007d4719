//! The conversational session and its executor.
//!
//! `ChatSession` owns the suspend/resume bookkeeping and talks to the graph
//! only through the narrow [`ChatExecutor`] trait, so the loop is testable
//! with a fake executor.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use crate::agent::TOOLS_NODE;
use crate::error::AgentError;
use crate::graph::CompiledStateGraph;
use crate::memory::{Checkpointer, RunnableConfig};
use crate::message::Message;
use crate::state::ChatState;
use crate::stream::{StreamEvent, StreamMode};

/// Operator answer fed back into a suspended run.
///
/// Serialized as `{"data": <string>}` and matched to the most recent
/// suspension of the thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePayload {
    pub data: String,
}

impl ResumePayload {
    pub fn new(data: impl Into<String>) -> Self {
        ResumePayload { data: data.into() }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "data": self.data })
    }
}

/// One line of user input, already classified by the session.
#[derive(Debug, Clone)]
pub enum TurnInput {
    /// A fresh user message.
    Message(String),
    /// The answer to the pending suspension.
    Resume(ResumePayload),
}

/// What a turn produced, in order.
#[derive(Debug, Clone)]
pub enum TurnEvent {
    /// The newest message after a node ran.
    Message(Message),
    /// The run suspended; the payload describes what it needs.
    Suspended(serde_json::Value),
}

/// Narrow seam between the conversational loop and graph execution.
#[async_trait]
pub trait ChatExecutor: Send + Sync {
    async fn advance(&self, input: TurnInput) -> Result<Vec<TurnEvent>, AgentError>;
}

/// Production executor: drives the compiled chat graph with checkpointed
/// per-thread state.
pub struct GraphExecutor {
    graph: CompiledStateGraph<ChatState>,
    checkpointer: Arc<dyn Checkpointer<ChatState>>,
    thread_id: String,
}

impl GraphExecutor {
    pub fn new(
        graph: CompiledStateGraph<ChatState>,
        checkpointer: Arc<dyn Checkpointer<ChatState>>,
        thread_id: impl Into<String>,
    ) -> Self {
        GraphExecutor {
            graph,
            checkpointer,
            thread_id: thread_id.into(),
        }
    }

    fn config(&self) -> RunnableConfig {
        RunnableConfig::with_thread_id(self.thread_id.clone())
    }

    async fn load_state(&self, config: &RunnableConfig) -> Result<Option<ChatState>, AgentError> {
        self.checkpointer
            .get_tuple(config)
            .await
            .map(|found| found.map(|checkpoint| checkpoint.channel_values))
            .map_err(|e| AgentError::ExecutionFailed(format!("checkpoint load failed: {}", e)))
    }

    async fn drive(
        &self,
        state: ChatState,
        config: RunnableConfig,
    ) -> Result<Vec<TurnEvent>, AgentError> {
        let mut stream =
            self.graph
                .stream(state, Some(config), HashSet::from_iter([StreamMode::Values]));
        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Values(snapshot) => {
                    if let Some(message) = snapshot.last_message() {
                        events.push(TurnEvent::Message(message.clone()));
                    }
                }
                StreamEvent::Interrupt(interrupt) => {
                    events.push(TurnEvent::Suspended(interrupt.value));
                }
                StreamEvent::Error(message) => {
                    return Err(AgentError::ExecutionFailed(message));
                }
                StreamEvent::Updates { .. } => {}
            }
        }
        Ok(events)
    }
}

#[async_trait]
impl ChatExecutor for GraphExecutor {
    async fn advance(&self, input: TurnInput) -> Result<Vec<TurnEvent>, AgentError> {
        let config = self.config();
        match input {
            TurnInput::Message(text) => {
                let mut state = self.load_state(&config).await?.unwrap_or_default();
                state.messages.push(Message::user(text));
                state.tool_calls.clear();
                state.resume_value = None;
                self.drive(state, config).await
            }
            TurnInput::Resume(payload) => {
                let mut state = self.load_state(&config).await?.ok_or_else(|| {
                    AgentError::ExecutionFailed(format!(
                        "no pending suspension for thread {}",
                        self.thread_id
                    ))
                })?;
                state.resume_value = Some(payload.to_value());
                let mut config = config;
                config.resume_from_node_id = Some(TOOLS_NODE.to_string());
                self.drive(state, config).await
            }
        }
    }
}

/// The conversational loop's session: one in-flight turn at a time, with
/// suspend/resume bookkeeping.
pub struct ChatSession {
    executor: Arc<dyn ChatExecutor>,
    suspended: bool,
}

impl ChatSession {
    pub fn new(executor: Arc<dyn ChatExecutor>) -> Self {
        ChatSession {
            executor,
            suspended: false,
        }
    }

    /// Whether the previous turn left a suspension pending.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Processes one line of user input.
    ///
    /// When the previous turn suspended, the line is the operator's answer
    /// and resumes the run; otherwise it is a fresh user message.
    pub async fn turn(&mut self, line: &str) -> Result<Vec<TurnEvent>, AgentError> {
        let input = if self.suspended {
            self.suspended = false;
            TurnInput::Resume(ResumePayload::new(line))
        } else {
            TurnInput::Message(line.to_string())
        };
        let events = self.executor.advance(input).await?;
        if events
            .iter()
            .any(|event| matches!(event, TurnEvent::Suspended(_)))
        {
            self.suspended = true;
        }
        Ok(events)
    }
}
