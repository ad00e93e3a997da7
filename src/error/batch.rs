//! Batch-level error types.

use thiserror::Error;

/// Failure of the batch machinery itself, as opposed to a task body failing or panicking.
///
/// Reported once per batch through the error hook. Tasks affected by a batch error are still
/// counted as failed so the finalize stats stay consistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The runner executing a task died outside the task body.
    #[error("Task runner failed: {message}")]
    RunnerFailed {
        /// Error reported by the runtime for the runner.
        message: String,
    },

    /// The worker pool shut down before these tasks could run.
    #[error("Worker pool stopped before {remaining} task(s) could run")]
    PoolStopped {
        /// Tasks that never got a permit.
        remaining: usize,
    },
}
