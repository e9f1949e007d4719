/// Per-run configuration: thread identity, checkpoint selection, resume
/// target.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Conversation thread; required for checkpointing.
    pub thread_id: Option<String>,
    /// Load this checkpoint instead of the latest one.
    pub checkpoint_id: Option<String>,
    /// Namespace within a thread; empty for the default namespace.
    pub checkpoint_ns: String,
    /// Start execution at this node instead of the graph entry point.
    pub resume_from_node_id: Option<String>,
}

impl RunnableConfig {
    pub fn with_thread_id(thread_id: impl Into<String>) -> Self {
        RunnableConfig {
            thread_id: Some(thread_id.into()),
            ..Default::default()
        }
    }
}
