/// Errors detected while compiling a [`StateGraph`](crate::graph::StateGraph).
#[derive(Debug, thiserror::Error)]
pub enum CompilationError {
    /// An edge or conditional source references a node that was never added.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Neither an edge nor a conditional path reaches END.
    #[error("graph must have a path to END")]
    MissingEnd,

    /// Plain edges branch or loop where a single chain is required.
    #[error("edges must form a single chain from START: {0}")]
    InvalidChain(String),

    /// A node has both a plain outgoing edge and conditional edges.
    #[error("node has both an edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A conditional path map points at an unknown node.
    #[error("invalid conditional path map: {0}")]
    InvalidConditionalPathMap(String),
}
