//! Errors surfaced by graph execution.

use crate::graph::GraphInterrupt;

/// Error raised while running a compiled graph or one of its nodes.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A node or the run loop failed in a way that ends the run.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// A node paused the graph; the pre-node state was checkpointed.
    #[error(transparent)]
    Interrupted(#[from] GraphInterrupt),

    /// The model asked for more than one tool call in a single turn.
    /// The runtime executes tool calls one at a time, so this is rejected
    /// as a recoverable error rather than executing an arbitrary subset.
    #[error("model requested {0} tool calls, but only one per turn is supported")]
    ParallelToolCalls(usize),
}
