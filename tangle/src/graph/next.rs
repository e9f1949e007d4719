/// Routing decision returned by a node alongside its state update.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the edge (or conditional router) configured for this node.
    Continue,
    /// Jump directly to the named node.
    Node(String),
    /// Stop the run.
    End,
}
