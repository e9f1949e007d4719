//! Graph interrupts: a node pauses the run and hands a payload to the caller.

use serde::{Deserialize, Serialize};

/// Payload carried out of the graph when a node pauses execution.
///
/// The value is opaque to the runtime; for the human-assistance tool it is
/// `{"query": <text>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interrupt {
    pub value: serde_json::Value,
    pub id: Option<String>,
}

impl Interrupt {
    pub fn new(value: serde_json::Value) -> Self {
        Interrupt { value, id: None }
    }

    pub fn with_id(value: serde_json::Value, id: impl Into<String>) -> Self {
        Interrupt {
            value,
            id: Some(id.into()),
        }
    }
}

/// Error wrapper that carries an [`Interrupt`] through the node result type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Graph interrupted: {0:?}")]
pub struct GraphInterrupt(pub Interrupt);

impl From<Interrupt> for GraphInterrupt {
    fn from(interrupt: Interrupt) -> Self {
        GraphInterrupt(interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the wrapper keeps the payload and renders it in the
    /// error message.
    #[test]
    fn graph_interrupt_carries_payload() {
        let err = GraphInterrupt::from(Interrupt::new(serde_json::json!({"query": "help me"})));
        assert_eq!(err.0.value["query"], "help me");
        assert!(err.to_string().contains("Graph interrupted"));
    }
}
