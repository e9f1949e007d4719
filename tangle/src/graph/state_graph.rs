//! Graph builder and compile-time validation.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::channels::{BoxedStateUpdater, ReplaceUpdater};
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::Node;
use crate::memory::Checkpointer;

/// Virtual entry point. Exactly one edge must leave it.
pub const START: &str = "__start__";
/// Virtual exit point. Reached via an edge or a conditional path.
pub const END: &str = "__end__";

/// Mutable graph builder.
///
/// Nodes and edges are accumulated, then [`compile`](StateGraph::compile)
/// validates the topology and produces an executable graph.
pub struct StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    state_updater: Option<BoxedStateUpdater<S>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        StateGraph {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            state_updater: None,
        }
    }

    /// Registers a node under the given id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a plain edge. `START` and `END` are valid endpoints.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Attaches conditional edges to `source`.
    ///
    /// The router inspects the state and returns a routing key; `path_map`
    /// optionally translates keys to node ids (or `END`).
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Overrides the default replace-everything state updater.
    pub fn with_state_updater(mut self, updater: BoxedStateUpdater<S>) -> Self {
        self.state_updater = Some(updater);
        self
    }

    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(None)
    }

    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(checkpointer))
    }

    fn compile_internal(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if let Some(map) = &router.path_map {
                for target in map.values() {
                    if target != END && !self.nodes.contains_key(target) {
                        return Err(CompilationError::InvalidConditionalPathMap(format!(
                            "target node not found: {}",
                            target
                        )));
                    }
                }
            }
        }

        let start_edges: Vec<&(String, String)> =
            self.edges.iter().filter(|(from, _)| from == START).collect();
        let first_node_id = match start_edges.as_slice() {
            [] => return Err(CompilationError::MissingStart),
            [(_, to)] => to.clone(),
            _ => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START (branch)".to_string(),
                ))
            }
        };

        let has_end = self.edges.iter().any(|(_, to)| to == END)
            || self.conditional_edges.values().any(|router| {
                router
                    .path_map
                    .as_ref()
                    .map_or(true, |map| map.values().any(|target| target == END))
            });
        if !has_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut seen_froms = HashSet::new();
        for (from, _) in &self.edges {
            if from == START {
                continue;
            }
            if !seen_froms.insert(from.clone()) {
                return Err(CompilationError::InvalidChain(format!(
                    "duplicate outgoing edge from {} (branch)",
                    from
                )));
            }
            if self.conditional_edges.contains_key(from) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(from.clone()));
            }
        }

        let mut next_map: HashMap<String, NextEntry<S>> = HashMap::new();
        for (from, to) in &self.edges {
            if from != START {
                next_map.insert(from.clone(), NextEntry::Unconditional(to.clone()));
            }
        }
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        // Conditional graphs may legitimately cycle (tool loops); the walk
        // and its cycle check only apply to purely linear graphs.
        let mut edge_order = vec![first_node_id.clone()];
        if !next_map
            .values()
            .any(|entry| matches!(entry, NextEntry::Conditional(_)))
        {
            let mut visited = HashSet::from([first_node_id.clone()]);
            let mut current = first_node_id.clone();
            while let Some(NextEntry::Unconditional(to)) = next_map.get(&current) {
                if to == END {
                    break;
                }
                if !visited.insert(to.clone()) {
                    return Err(CompilationError::InvalidChain(format!(
                        "cycle detected at {}",
                        to
                    )));
                }
                edge_order.push(to.clone());
                current = to.clone();
            }
        }

        let state_updater = self
            .state_updater
            .unwrap_or_else(|| Arc::new(ReplaceUpdater));

        Ok(CompiledStateGraph::new(
            self.nodes,
            first_node_id,
            edge_order,
            next_map,
            checkpointer,
            state_updater,
        ))
    }
}
