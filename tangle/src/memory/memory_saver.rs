//! In-memory checkpoint store.
//!
//! Checkpoints live for the process lifetime only; a restart loses any
//! pending suspensions along with the conversation history.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::{Checkpoint, CheckpointError, Checkpointer, RunnableConfig};

/// Thread-scoped in-memory checkpointer.
#[derive(Debug)]
pub struct MemorySaver<S> {
    by_thread: Arc<RwLock<HashMap<String, Vec<Checkpoint<S>>>>>,
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for MemorySaver<S> {
    fn clone(&self) -> Self {
        MemorySaver {
            by_thread: Arc::clone(&self.by_thread),
        }
    }
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        MemorySaver {
            by_thread: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn storage_key(config: &RunnableConfig) -> Result<String, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_deref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok(format!("{}:{}", thread_id, config.checkpoint_ns))
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + std::fmt::Debug,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = Self::storage_key(config)?;
        let mut store = self.by_thread.write().await;
        store.entry(key).or_default().push(checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let key = Self::storage_key(config)?;
        let store = self.by_thread.read().await;
        let Some(checkpoints) = store.get(&key) else {
            return Ok(None);
        };
        let found = match &config.checkpoint_id {
            Some(id) => checkpoints.iter().find(|cp| &cp.id == id),
            None => checkpoints.last(),
        };
        Ok(found.cloned())
    }
}
