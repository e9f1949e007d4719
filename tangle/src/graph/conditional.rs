//! Conditional edges: state-driven routing out of a node.

use std::collections::HashMap;
use std::sync::Arc;

/// Routing function: inspects the state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A conditional router attached to a node.
///
/// The routing function returns a key; when a `path_map` is present the key
/// is translated to a node id (or `END`), otherwise the key itself is used
/// as the target node id.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub path: ConditionalRouterFn<S>,
    pub path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        ConditionalRouter { path, path_map }
    }

    /// Resolves the next node id for the given state.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        self.path_map
            .as_ref()
            .and_then(|map| map.get(&key))
            .cloned()
            .unwrap_or(key)
    }
}

/// Outgoing routing entry for a node in a compiled graph.
#[derive(Clone)]
pub enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}
