use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Next;

/// A unit of work in the graph.
///
/// A node receives the current state, returns its state update and a
/// routing decision. Most nodes return [`Next::Continue`] and let the
/// graph's edges decide where to go.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Stable identifier, used for registration, routing, and logging.
    fn id(&self) -> &str;

    /// Runs the node against the current state.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
