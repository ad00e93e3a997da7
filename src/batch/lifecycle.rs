//! Per-batch outcome state machine.
//!
//! The execution backend owns one [`BatchLifecycle`] per accepted batch and feeds it task
//! results as they arrive, in any order. [`BatchLifecycle::finalize`] consumes the lifecycle,
//! so the terminal hooks can only fire once per batch.

use chrono::Utc;

use crate::{
    batch::BatchHooks,
    error::batch::BatchError,
    model::batch::{BatchHandle, BatchSnapshot, BatchState, BatchStats},
};

/// Outcome tracker for a single batch.
#[derive(Debug)]
pub struct BatchLifecycle {
    handle: BatchHandle,
    state: BatchState,
    succeeded: usize,
    failed: usize,
    error: Option<BatchError>,
}

/// Result of finalizing a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// State the batch ended in before being finalized.
    pub state: BatchState,
    /// Final task counts.
    pub stats: BatchStats,
    /// Batch-level error, if one occurred.
    pub error: Option<BatchError>,
}

impl BatchLifecycle {
    /// Starts tracking a batch that was just accepted.
    pub fn new(handle: BatchHandle) -> Self {
        Self {
            handle,
            state: BatchState::Submitted,
            succeeded: 0,
            failed: 0,
            error: None,
        }
    }

    /// Handle of the tracked batch.
    pub fn handle(&self) -> &BatchHandle {
        &self.handle
    }

    /// Current state.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Marks the batch as running.
    pub fn start(&mut self) {
        if self.state == BatchState::Submitted {
            self.state = BatchState::Running;
        }
    }

    /// Records a successful task.
    pub fn task_succeeded(&mut self) {
        self.start();
        self.succeeded += 1;
    }

    /// Records a failed task. Task failures never fail the batch itself.
    pub fn task_failed(&mut self) {
        self.start();
        self.failed += 1;
    }

    /// Records `count` tasks that will never run.
    pub fn tasks_skipped(&mut self, count: usize) {
        self.failed += count;
    }

    /// Records a batch-level error.
    ///
    /// Only the first error is reported through `on_error`; later ones are logged.
    pub fn batch_error(&mut self, error: BatchError) {
        if self.error.is_some() {
            tracing::warn!(
                "[Batches][{}] Additional error during {} batch processing: {}",
                self.handle.id,
                self.handle.entity.kind,
                error
            );
            return;
        }

        self.error = Some(error);
    }

    /// Task counts so far.
    ///
    /// Before finalization `succeeded + failed` may be less than `total`.
    pub fn progress(&self) -> BatchStats {
        BatchStats {
            succeeded: self.succeeded,
            failed: self.failed,
            total: self.handle.total_tasks,
        }
    }

    /// Snapshot of the batch for queries.
    pub fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            handle: self.handle.clone(),
            state: self.state,
            stats: self.progress(),
            error: self.error.as_ref().map(ToString::to_string),
            finished_at: None,
        }
    }

    /// Terminal state the recorded results lead to.
    fn terminal_state(&self) -> BatchState {
        if self.error.is_some() {
            BatchState::Errored
        } else if self.failed == 0 && self.succeeded >= self.handle.total_tasks {
            BatchState::Completed
        } else {
            BatchState::CompletedWithFailures
        }
    }

    /// Finalizes the batch, firing the hooks in order.
    ///
    /// Fires `on_error` if a batch-level error was recorded, otherwise `on_success` if every
    /// task succeeded, otherwise neither; then always fires `on_finalize`. Tasks without a
    /// recorded result are counted as failed so the finalize stats always add up.
    ///
    /// # Returns
    /// - `(BatchOutcome, BatchSnapshot)` - The outcome and the batch's finalized snapshot
    pub fn finalize(mut self, hooks: &dyn BatchHooks) -> (BatchOutcome, BatchSnapshot) {
        let unaccounted = self.progress().pending();
        if unaccounted > 0 {
            tracing::warn!(
                "[Batches][{}] {} task(s) finished without a result; counting them as failed",
                self.handle.id,
                unaccounted
            );
            self.failed += unaccounted;
        }

        let state = self.terminal_state();
        let stats = BatchStats::from_failures(self.handle.total_tasks, self.failed);

        match (&self.error, state) {
            (Some(error), _) => hooks.on_error(&self.handle, error),
            (None, BatchState::Completed) => hooks.on_success(&self.handle),
            _ => {}
        }

        hooks.on_finalize(&self.handle, &stats);
        self.state = BatchState::Finalized;

        let snapshot = BatchSnapshot {
            handle: self.handle,
            state: BatchState::Finalized,
            stats,
            error: self.error.as_ref().map(ToString::to_string),
            finished_at: Some(Utc::now()),
        };

        (
            BatchOutcome {
                state,
                stats,
                error: self.error,
            },
            snapshot,
        )
    }
}
