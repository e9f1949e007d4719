//! Events emitted while a graph run streams.

use crate::graph::Interrupt;

/// What a stream subscriber wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Full merged state after each node.
    Values,
    /// Per-node raw updates with the producing node id.
    Updates,
}

/// One event on a graph run stream.
///
/// `Interrupt` and `Error` are emitted regardless of the selected modes;
/// they terminate the stream.
#[derive(Debug, Clone)]
pub enum StreamEvent<S> {
    Values(S),
    Updates { node_id: String, state: S },
    Interrupt(Interrupt),
    Error(String),
}
