//! Structured logging for graph execution.
//!
//! Thin wrappers around `tracing` so the run loop reads as a sequence of
//! lifecycle events. Enable with an `EnvFilter` such as `tangle=debug`.

use std::fmt::Debug;

pub fn log_graph_start(start_node_id: &str) {
    tracing::info!(start = %start_node_id, "graph execution started");
}

pub fn log_node_start(node_id: &str) {
    tracing::debug!(node = %node_id, "node started");
}

pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::trace!(node = %node_id, state = ?state, "node input state");
}

pub fn log_node_complete(node_id: &str) {
    tracing::debug!(node = %node_id, "node completed");
}

pub fn log_state_update<S: Debug>(state: &S) {
    tracing::trace!(state = ?state, "state updated");
}

pub fn log_graph_complete() {
    tracing::info!("graph execution completed");
}

pub fn log_graph_error(message: &str) {
    tracing::error!(error = %message, "graph execution failed");
}
