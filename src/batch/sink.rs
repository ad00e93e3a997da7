//! Observability sink receiving batch lifecycle records.
//!
//! The reporter turns lifecycle hooks into [`BatchRecord`]s and hands them to a
//! [`BatchSink`]. Production uses [`TracingSink`]; tests inject a recording sink to assert on
//! exactly which records were emitted.

use tracing::Level;

use crate::model::{batch::BatchId, batch::Lane, entity::EntityKind};

/// Structured record describing a batch lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRecord {
    /// Every task of the batch succeeded.
    Completed {
        /// ID of the batch.
        handle_id: BatchId,
        /// Display name of the batch.
        display_name: String,
        /// Kind of entity the batch synchronized.
        kind: EntityKind,
        /// Lane the batch ran on.
        lane: Lane,
    },
    /// The batch machinery failed.
    Errored {
        /// ID of the batch.
        handle_id: BatchId,
        /// Display name of the batch.
        display_name: String,
        /// Kind of entity the batch synchronized.
        kind: EntityKind,
        /// Lane the batch ran on.
        lane: Lane,
        /// Message of the batch-level error.
        error_message: String,
        /// Error followed by each of its sources.
        error_trace: Vec<String>,
    },
    /// The batch reached its terminal state. Emitted exactly once per batch.
    Finalized {
        /// ID of the batch.
        handle_id: BatchId,
        /// Display name of the batch.
        display_name: String,
        /// Kind of entity the batch synchronized.
        kind: EntityKind,
        /// Lane the batch ran on.
        lane: Lane,
        /// Tasks that succeeded.
        succeeded_count: usize,
        /// Tasks that failed.
        failed_count: usize,
        /// Tasks in the batch.
        total_count: usize,
    },
}

impl BatchRecord {
    /// Severity of the record.
    pub fn level(&self) -> Level {
        match self {
            BatchRecord::Completed { .. } => Level::DEBUG,
            BatchRecord::Errored { .. } => Level::ERROR,
            BatchRecord::Finalized { .. } => Level::INFO,
        }
    }

    /// ID of the batch the record belongs to.
    pub fn handle_id(&self) -> BatchId {
        match self {
            BatchRecord::Completed { handle_id, .. }
            | BatchRecord::Errored { handle_id, .. }
            | BatchRecord::Finalized { handle_id, .. } => *handle_id,
        }
    }

    /// Display name of the batch the record belongs to.
    pub fn display_name(&self) -> &str {
        match self {
            BatchRecord::Completed { display_name, .. }
            | BatchRecord::Errored { display_name, .. }
            | BatchRecord::Finalized { display_name, .. } => display_name,
        }
    }
}

/// Destination for batch lifecycle records.
pub trait BatchSink: Send + Sync {
    /// Emits a single record.
    fn emit(&self, record: BatchRecord);
}

/// Sink writing batch records as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl BatchSink for TracingSink {
    fn emit(&self, record: BatchRecord) {
        match record {
            BatchRecord::Completed {
                handle_id,
                display_name,
                kind,
                lane,
            } => {
                tracing::debug!(
                    batch_id = %handle_id,
                    name = %display_name,
                    lane = %lane,
                    "[Batches][{}] {} batch successfully completed.",
                    handle_id,
                    kind
                );
            }
            BatchRecord::Errored {
                handle_id,
                display_name,
                kind,
                lane,
                error_message,
                error_trace,
            } => {
                tracing::error!(
                    batch_id = %handle_id,
                    name = %display_name,
                    lane = %lane,
                    error = %error_message,
                    trace = ?error_trace,
                    "[Batches][{}] An error occurred during {} batch processing.",
                    handle_id,
                    kind
                );
            }
            BatchRecord::Finalized {
                handle_id,
                display_name,
                kind,
                lane,
                succeeded_count,
                failed_count,
                total_count,
            } => {
                tracing::info!(
                    batch_id = %handle_id,
                    name = %display_name,
                    lane = %lane,
                    succeeded = succeeded_count,
                    failed = failed_count,
                    total = total_count,
                    "[Batches][{}] {} batch executed.",
                    handle_id,
                    kind
                );
            }
        }
    }
}
