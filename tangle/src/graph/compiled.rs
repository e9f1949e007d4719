//! Executable graph produced by [`StateGraph::compile`].
//!
//! The run loop drives one node at a time: run, merge the update through
//! the state updater, emit stream events, route. Interrupts checkpoint the
//! pre-node state so a later run can resume at the interrupted node.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::channels::BoxedStateUpdater;
use crate::error::AgentError;
use crate::graph::conditional::NextEntry;
use crate::graph::logging;
use crate::graph::node::Node;
use crate::graph::state_graph::END;
use crate::graph::Next;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};
use crate::stream::{StreamEvent, StreamMode};

/// A validated, executable graph.
#[derive(Clone)]
pub struct CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub(crate) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) first_node_id: String,
    pub(crate) edge_order: Vec<String>,
    pub(crate) next_map: HashMap<String, NextEntry<S>>,
    checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    state_updater: BoxedStateUpdater<S>,
}

struct StreamContext<S> {
    tx: mpsc::Sender<StreamEvent<S>>,
    modes: HashSet<StreamMode>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub(crate) fn new(
        nodes: HashMap<String, Arc<dyn Node<S>>>,
        first_node_id: String,
        edge_order: Vec<String>,
        next_map: HashMap<String, NextEntry<S>>,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
        state_updater: BoxedStateUpdater<S>,
    ) -> Self {
        CompiledStateGraph {
            nodes,
            first_node_id,
            edge_order,
            next_map,
            checkpointer,
            state_updater,
        }
    }

    /// Runs the graph to completion and returns the final state.
    pub async fn invoke(
        &self,
        mut state: S,
        config: Option<RunnableConfig>,
    ) -> Result<S, AgentError> {
        if self.nodes.is_empty() {
            return Err(AgentError::ExecutionFailed("empty graph".to_string()));
        }
        let start = self.resolve_start(config.as_ref());
        self.run_loop(&mut state, config.as_ref(), start, None)
            .await?;
        Ok(state)
    }

    /// Runs the graph on a background task and streams events.
    ///
    /// Failures are reported on the stream: interrupts as
    /// [`StreamEvent::Interrupt`], anything else as [`StreamEvent::Error`].
    pub fn stream(
        &self,
        state: S,
        config: Option<RunnableConfig>,
        modes: HashSet<StreamMode>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        tokio::spawn(async move {
            if graph.nodes.is_empty() {
                let _ = tx
                    .send(StreamEvent::Error("empty graph".to_string()))
                    .await;
                return;
            }
            let start = graph.resolve_start(config.as_ref());
            let ctx = StreamContext { tx, modes };
            let mut state = state;
            // errors have already been reported as stream events
            let _ = graph
                .run_loop(&mut state, config.as_ref(), start, Some(&ctx))
                .await;
        });
        ReceiverStream::new(rx)
    }

    fn resolve_start(&self, config: Option<&RunnableConfig>) -> String {
        config
            .and_then(|c| c.resume_from_node_id.clone())
            .filter(|id| self.nodes.contains_key(id))
            .unwrap_or_else(|| self.first_node_id.clone())
    }

    async fn run_loop(
        &self,
        state: &mut S,
        config: Option<&RunnableConfig>,
        start_node_id: String,
        stream: Option<&StreamContext<S>>,
    ) -> Result<(), AgentError> {
        logging::log_graph_start(&start_node_id);
        let mut current_id = start_node_id;
        loop {
            let node = self.nodes.get(&current_id).ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current_id))
            })?;
            logging::log_node_start(&current_id);
            logging::log_node_state(&current_id, state);

            let (update, next) = match node.run(state.clone()).await {
                Ok(result) => result,
                Err(AgentError::Interrupted(interrupt)) => {
                    // checkpoint the pre-node state so the pending work
                    // survives until the run is resumed
                    self.save_checkpoint(state, config, CheckpointSource::Update)
                        .await;
                    if let Some(stream) = stream {
                        let _ = stream
                            .tx
                            .send(StreamEvent::Interrupt(interrupt.0.clone()))
                            .await;
                    }
                    logging::log_graph_error(&format!("interrupted at {}", current_id));
                    return Err(AgentError::Interrupted(interrupt));
                }
                Err(err) => {
                    if let Some(stream) = stream {
                        let _ = stream.tx.send(StreamEvent::Error(err.to_string())).await;
                    }
                    logging::log_graph_error(&err.to_string());
                    return Err(err);
                }
            };
            logging::log_node_complete(&current_id);

            self.state_updater.apply_update(state, &update);
            logging::log_state_update(state);

            if let Some(stream) = stream {
                if stream.modes.contains(&StreamMode::Values) {
                    let _ = stream.tx.send(StreamEvent::Values(state.clone())).await;
                }
                if stream.modes.contains(&StreamMode::Updates) {
                    let _ = stream
                        .tx
                        .send(StreamEvent::Updates {
                            node_id: current_id.clone(),
                            state: update,
                        })
                        .await;
                }
            }

            let target = match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => match self.next_map.get(&current_id) {
                    Some(NextEntry::Conditional(router)) => {
                        let target = router.resolve_next(state);
                        tracing::debug!(from = %current_id, to = %target, "conditional routing");
                        Some(target)
                    }
                    Some(NextEntry::Unconditional(to)) => Some(to.clone()),
                    None => self
                        .edge_order
                        .iter()
                        .position(|id| id == &current_id)
                        .and_then(|i| self.edge_order.get(i + 1))
                        .cloned(),
                },
            };
            match target {
                Some(id) if id != END => current_id = id,
                _ => break,
            }
        }
        self.save_checkpoint(state, config, CheckpointSource::Loop)
            .await;
        logging::log_graph_complete();
        Ok(())
    }

    async fn save_checkpoint(
        &self,
        state: &S,
        config: Option<&RunnableConfig>,
        source: CheckpointSource,
    ) {
        let (Some(checkpointer), Some(config)) = (self.checkpointer.as_ref(), config) else {
            return;
        };
        if config.thread_id.is_none() {
            return;
        }
        let checkpoint = Checkpoint::from_state(state.clone(), source, 0);
        if let Err(err) = checkpointer.put(config, &checkpoint).await {
            tracing::warn!(error = %err, "failed to save checkpoint");
        }
    }
}
