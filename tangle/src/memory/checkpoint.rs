//! Checkpoint snapshots of graph state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format version for stored checkpoints.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Why a checkpoint was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointSource {
    /// Initial input state.
    #[default]
    Input,
    /// End of a completed run.
    Loop,
    /// Mid-run save, e.g. before an interrupt.
    Update,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    pub step: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// A snapshot of graph state for one thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    pub v: u32,
    pub id: String,
    pub ts: String,
    pub channel_values: S,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    pub fn from_state(state: S, source: CheckpointSource, step: i64) -> Self {
        let now = Utc::now();
        Checkpoint {
            v: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            ts: now.to_rfc3339(),
            channel_values: state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}
