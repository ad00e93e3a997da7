//! Execution backend error types.
//!
//! These errors are the only failures `dispatch` returns to its caller: they mean the batch
//! was never accepted, so no lifecycle hooks will fire for it. They are not retried here.

use thiserror::Error;

use crate::model::batch::Lane;

/// Worker pool error type.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker pool is not running, so no batch can be accepted.
    ///
    /// Returned when submitting before `start()` or after `stop()`.
    #[error("Worker pool is not running; batch was not accepted")]
    BackendUnavailable,

    /// The batch queue is at capacity.
    #[error("Batch queue is full ({capacity} batches queued); rejected batch for lane {lane}")]
    QueueFull {
        /// Lane the rejected batch was submitted to.
        lane: Lane,
        /// Maximum number of queued batches across all lanes.
        capacity: usize,
    },

    /// The worker pool was stopped and cannot be started again.
    #[error("Worker pool has been stopped and cannot be restarted")]
    PoolStopped,
}
