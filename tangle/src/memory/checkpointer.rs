use async_trait::async_trait;

use crate::memory::{Checkpoint, RunnableConfig};

/// Errors from checkpoint storage.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// The config carried no `thread_id`; checkpoints are scoped to threads.
    #[error("thread_id required")]
    ThreadIdRequired,

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Stores and retrieves checkpoints per conversation thread.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync,
{
    /// Saves a checkpoint; returns its id.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError>;

    /// Loads the checkpoint selected by `config`: a specific
    /// `checkpoint_id` when set, otherwise the latest for the thread.
    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<Checkpoint<S>>, CheckpointError>;
}
