//! Checkpointing: saving and restoring graph state per conversation thread.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;

pub use checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSource, CHECKPOINT_VERSION};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
