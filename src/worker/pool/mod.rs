//! Worker pool executing batches with concurrency control.
//!
//! This module provides the [`WorkerPool`], the production [`ExecutionBackend`]. Per-lane
//! dispatcher tasks take a runner slot, then poll the [`BatchQueue`] and spawn one runner per
//! batch. At most `max_concurrent_tasks` batches run at once; the rest wait in the queue,
//! which rejects submissions once `max_queued_batches` are waiting. Every task of every batch
//! acquires a permit from one shared semaphore before its body runs, so `max_concurrent_tasks`
//! also bounds the tasks of the pool as a whole. Each task runs under the configured timeout
//! and panics are caught so a batch always reaches finalization.

mod config;

#[cfg(test)]
mod tests;

pub use config::WorkerPoolConfig;

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::FutureExt;
use tokio::{
    sync::{Mutex, OwnedSemaphorePermit, RwLock, Semaphore},
    task::{JoinError, JoinHandle, JoinSet},
};
use tokio_util::sync::CancellationToken;

use crate::{
    batch::lifecycle::BatchLifecycle,
    error::{batch::BatchError, task::TaskError, worker::WorkerError, Error},
    model::{
        batch::{BatchHandle, BatchId, BatchSnapshot, Lane},
        task::Task,
    },
    worker::{
        handler::TaskHandler,
        queue::{BatchQueue, QueuedBatch},
        store::BatchStore,
        ExecutionBackend, PendingBatch,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolState {
    Idle,
    Running,
    Stopped,
}

/// Worker pool executing batches from the [`BatchQueue`].
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<WorkerPoolRef>,
}

/// Configuration and runtime state shared by every clone of a [`WorkerPool`].
struct WorkerPoolRef {
    config: WorkerPoolConfig,
    queue: Arc<BatchQueue>,
    store: Arc<BatchStore>,
    /// One permit per running batch.
    runner_slots: Arc<Semaphore>,
    executor: BatchExecutor,
    shutdown: CancellationToken,
    state: RwLock<PoolState>,
    dispatcher_handles: RwLock<Vec<JoinHandle<()>>>,
    cleanup_handle: Mutex<Option<JoinHandle<()>>>,
}

/// Result of a single task as seen by its batch.
#[derive(Debug)]
enum TaskOutcome {
    Succeeded,
    Failed,
    /// Cancelled before starting because a sibling failed.
    Skipped,
    /// The pool stopped before the task could acquire a permit.
    Stopped,
}

/// Runs accepted batches; cloned into every dispatcher.
#[derive(Clone)]
struct BatchExecutor {
    handler: Arc<dyn TaskHandler>,
    semaphore: Arc<Semaphore>,
    store: Arc<BatchStore>,
    task_timeout: Duration,
}

impl WorkerPool {
    /// Creates a new worker pool.
    ///
    /// The pool is created in a stopped state and must be started with `start()` before it
    /// accepts batches.
    ///
    /// # Arguments
    /// - `config` - Concurrency, timing, and queue settings
    /// - `handler` - Executes the body of each task
    ///
    /// # Returns
    /// - `WorkerPool` - New worker pool ready to start
    pub fn new(config: WorkerPoolConfig, handler: Arc<dyn TaskHandler>) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_tasks));
        let runner_slots = Arc::new(Semaphore::new(config.max_concurrent_tasks));
        let store = Arc::new(BatchStore::new());
        let queue = Arc::new(BatchQueue::new(config.max_queued_batches));

        let executor = BatchExecutor {
            handler,
            semaphore,
            store: Arc::clone(&store),
            task_timeout: config.task_timeout(),
        };

        Self {
            inner: Arc::new(WorkerPoolRef {
                config,
                queue,
                store,
                runner_slots,
                executor,
                shutdown: CancellationToken::new(),
                state: RwLock::new(PoolState::Idle),
                dispatcher_handles: RwLock::new(Vec::new()),
                cleanup_handle: Mutex::new(None),
            }),
        }
    }

    /// Starts the worker pool.
    ///
    /// Spawns `dispatcher_count` dispatchers for every lane plus the cleanup task pruning
    /// finished batch snapshots. Non-blocking and idempotent: calling it while running logs
    /// a warning and returns Ok.
    ///
    /// # Returns
    /// - `Ok(())` - Pool started successfully (or already running)
    /// - `Err(Error::WorkerError(WorkerError::PoolStopped))` - Pool was stopped before
    pub async fn start(&self) -> Result<(), Error> {
        let mut state = self.inner.state.write().await;

        match *state {
            PoolState::Running => {
                tracing::warn!("Worker pool is already running");
                return Ok(());
            }
            PoolState::Stopped => return Err(WorkerError::PoolStopped.into()),
            PoolState::Idle => {}
        }

        tracing::info!(
            "Starting worker pool with {} dispatcher(s) per lane (max {} concurrent tasks)",
            self.inner.config.dispatcher_count,
            self.inner.config.max_concurrent_tasks
        );

        let mut handles = self.inner.dispatcher_handles.write().await;
        for lane in Lane::ALL {
            for id in 0..self.inner.config.dispatcher_count {
                handles.push(self.spawn_dispatcher(lane, id));
            }
        }

        *self.inner.cleanup_handle.lock().await = Some(self.spawn_cleanup());
        *state = PoolState::Running;

        tracing::info!(
            "Worker pool started successfully ({} dispatcher(s) active)",
            handles.len()
        );

        Ok(())
    }

    /// Spawns a dispatcher polling a single lane.
    fn spawn_dispatcher(&self, lane: Lane, id: usize) -> JoinHandle<()> {
        let queue = Arc::clone(&self.inner.queue);
        let runner_slots = Arc::clone(&self.inner.runner_slots);
        let executor = self.inner.executor.clone();
        let shutdown = self.inner.shutdown.clone();
        let poll_interval = self.inner.config.poll_interval();

        tokio::spawn(async move {
            tracing::debug!("Dispatcher {} for lane {} started", id, lane);

            loop {
                tokio::select! {
                    // Shutdown wins over picking up another batch
                    biased;

                    _ = shutdown.cancelled() => {
                        tracing::debug!(
                            "Dispatcher {} for lane {} received shutdown signal",
                            id,
                            lane
                        );
                        break;
                    }

                    _ = Self::process_batches(
                        lane,
                        &queue,
                        &runner_slots,
                        &executor,
                        poll_interval,
                    ) => {}
                }
            }

            tracing::debug!("Dispatcher {} for lane {} stopped", id, lane);
        })
    }

    /// Takes the next batch of `lane` and spawns its runner, or sleeps if the lane is empty.
    ///
    /// Waits for a free runner slot before popping, so batches stay queued while the pool is
    /// saturated. The slot is released once the batch is finalized.
    async fn process_batches(
        lane: Lane,
        queue: &BatchQueue,
        runner_slots: &Arc<Semaphore>,
        executor: &BatchExecutor,
        poll_interval: Duration,
    ) {
        let slot = match Arc::clone(runner_slots).acquire_owned().await {
            Ok(slot) => slot,
            Err(_) => {
                // Closed by stop(); the shutdown branch ends the dispatcher
                tokio::time::sleep(poll_interval).await;
                return;
            }
        };

        match queue.pop(lane).await {
            Some(entry) => {
                tokio::spawn(executor.clone().run(entry, slot));
            }
            None => {
                drop(slot);
                tokio::time::sleep(poll_interval).await;
            }
        }
    }

    /// Spawns the task pruning finalized batch snapshots past their TTL.
    fn spawn_cleanup(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.inner.store);
        let shutdown = self.inner.shutdown.clone();
        let interval = self.inner.config.cleanup_interval();
        let ttl = self.inner.config.finished_batch_ttl();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;

                    _ = shutdown.cancelled() => break,

                    _ = tokio::time::sleep(interval) => {
                        let removed = store.prune_finished(ttl).await;
                        if removed > 0 {
                            tracing::info!("Pruned {} finished batch(es)", removed);
                        }
                    }
                }
            }
        })
    }

    /// Stops the worker pool gracefully.
    ///
    /// Closes the semaphore so no further task starts, signals every dispatcher and the
    /// cleanup task to stop, and closes the queue. Batches still queued are finalized as
    /// errored with all of their tasks failed. In-flight tasks run to completion; tasks of
    /// running batches that had not started yet are counted as failed.
    ///
    /// Idempotent. A stopped pool cannot be started again.
    ///
    /// # Returns
    /// - `Ok(())` - Pool stopped successfully (or was not running)
    pub async fn stop(&self) -> Result<(), Error> {
        let mut state = self.inner.state.write().await;

        if *state != PoolState::Running {
            tracing::debug!("Worker pool is not running");
            return Ok(());
        }
        *state = PoolState::Stopped;

        tracing::info!("Shutting down worker pool...");

        self.inner.executor.semaphore.close();
        self.inner.runner_slots.close();
        self.inner.shutdown.cancel();

        let stranded = self.inner.queue.close().await;
        if !stranded.is_empty() {
            tracing::warn!(
                "Finalizing {} queued batch(es) that never started",
                stranded.len()
            );
        }
        for entry in stranded {
            self.inner.executor.abandon(entry).await;
        }

        let mut handles = self.inner.dispatcher_handles.write().await;
        let dispatcher_count = handles.len();

        for (i, handle) in handles.drain(..).enumerate() {
            match tokio::time::timeout(self.inner.config.shutdown_timeout(), handle).await {
                Ok(Ok(())) => {
                    tracing::debug!("Dispatcher {} stopped cleanly", i);
                }
                Ok(Err(e)) => {
                    tracing::error!("Dispatcher {} panicked: {:?}", i, e);
                }
                Err(_) => {
                    tracing::warn!("Dispatcher {} did not stop within timeout", i);
                }
            }
        }

        if let Some(handle) = self.inner.cleanup_handle.lock().await.take() {
            let timeout = self.inner.config.shutdown_timeout();
            if let Err(e) = tokio::time::timeout(timeout, handle).await {
                tracing::warn!("Cleanup task did not stop within timeout: {}", e);
            }
        }

        tracing::info!(
            "Worker pool shut down ({} dispatchers stopped, in-flight tasks will complete)",
            dispatcher_count
        );

        Ok(())
    }

    /// Checks if the worker pool is running.
    pub async fn is_running(&self) -> bool {
        *self.inner.state.read().await == PoolState::Running
    }

    /// Gets the number of active dispatchers across all lanes.
    pub async fn dispatcher_count(&self) -> usize {
        self.inner.dispatcher_handles.read().await.len()
    }

    /// Latest snapshot of a batch.
    ///
    /// # Returns
    /// - `Some(BatchSnapshot)` - Batch is queued, running, or finalized within the TTL
    /// - `None` - Batch is unknown or was pruned
    pub async fn find_batch(&self, id: BatchId) -> Option<BatchSnapshot> {
        self.inner.store.get(id).await
    }

    /// Number of batches waiting on `lane`.
    pub async fn queued_batches(&self, lane: Lane) -> usize {
        self.inner.queue.len(lane).await
    }

    /// Gets the number of available semaphore permits.
    ///
    /// A value of 0 means the pool is at capacity.
    pub fn available_permits(&self) -> usize {
        self.inner.executor.semaphore.available_permits()
    }

    /// Gets the maximum number of concurrent tasks configured.
    pub fn max_concurrent_tasks(&self) -> usize {
        self.inner.config.max_concurrent_tasks
    }

    /// Gets the current number of tasks being executed.
    pub fn active_task_count(&self) -> usize {
        self.inner
            .config
            .max_concurrent_tasks
            .saturating_sub(self.available_permits())
    }
}

#[async_trait]
impl ExecutionBackend for WorkerPool {
    async fn submit(&self, batch: PendingBatch) -> Result<BatchHandle, Error> {
        // Held across the push so stop() cannot close the queue halfway through a submission
        let state = self.inner.state.read().await;
        if *state != PoolState::Running {
            return Err(WorkerError::BackendUnavailable.into());
        }

        let handle = BatchHandle::new(
            batch.display_name().to_string(),
            batch.lane(),
            batch.entity(),
            batch.tasks().len(),
        );

        self.inner
            .store
            .upsert(BatchSnapshot::submitted(handle.clone()))
            .await;

        let entry = QueuedBatch {
            handle: handle.clone(),
            batch,
        };
        if let Err(e) = self.inner.queue.push(entry).await {
            self.inner.store.remove(handle.id).await;
            return Err(e.into());
        }

        tracing::debug!(
            "[Batches][{}] Queued {} batch \"{}\" with {} task(s) on lane {}",
            handle.id,
            handle.entity.kind,
            handle.name,
            handle.total_tasks,
            handle.lane
        );

        Ok(handle)
    }
}

impl BatchExecutor {
    /// Runs every task of a batch and finalizes it, holding `slot` until done.
    async fn run(self, entry: QueuedBatch, slot: OwnedSemaphorePermit) {
        let QueuedBatch { handle, batch } = entry;
        let (tasks, allow_failures, hooks) = batch.into_parts();

        let mut lifecycle = BatchLifecycle::new(handle);
        lifecycle.start();
        self.store.upsert(lifecycle.snapshot()).await;

        tracing::debug!(
            "[Batches][{}] Running {} task(s)",
            lifecycle.handle().id,
            tasks.len()
        );

        let cancel = CancellationToken::new();
        let mut running = JoinSet::new();
        for task in tasks {
            running.spawn(Self::execute_task(
                task,
                Arc::clone(&self.handler),
                Arc::clone(&self.semaphore),
                self.task_timeout,
                cancel.clone(),
            ));
        }

        let mut stopped = 0;
        while let Some(joined) = running.join_next().await {
            match joined {
                Ok(TaskOutcome::Succeeded) => lifecycle.task_succeeded(),
                Ok(TaskOutcome::Failed) => {
                    lifecycle.task_failed();
                    if !allow_failures {
                        cancel.cancel();
                    }
                }
                Ok(TaskOutcome::Skipped) => lifecycle.task_failed(),
                Ok(TaskOutcome::Stopped) => stopped += 1,
                Err(e) => {
                    runner_failed(&mut lifecycle, e);
                    if !allow_failures {
                        cancel.cancel();
                    }
                }
            }

            self.store.upsert(lifecycle.snapshot()).await;
        }

        if stopped > 0 {
            lifecycle.batch_error(BatchError::PoolStopped { remaining: stopped });
            lifecycle.tasks_skipped(stopped);
        }

        let batch_id = lifecycle.handle().id;
        let (outcome, snapshot) = lifecycle.finalize(hooks.as_ref());
        self.store.upsert(snapshot).await;

        tracing::debug!(
            "[Batches][{}] Finished in state {:?} ({} succeeded, {} failed)",
            batch_id,
            outcome.state,
            outcome.stats.succeeded,
            outcome.stats.failed
        );

        drop(slot);
    }

    /// Finalizes a batch that was still queued when the pool stopped.
    async fn abandon(&self, entry: QueuedBatch) {
        let QueuedBatch { handle, batch } = entry;
        let (_, _, hooks) = batch.into_parts();
        let remaining = handle.total_tasks;

        let mut lifecycle = BatchLifecycle::new(handle);
        lifecycle.batch_error(BatchError::PoolStopped { remaining });
        lifecycle.tasks_skipped(remaining);

        let (_, snapshot) = lifecycle.finalize(hooks.as_ref());
        self.store.upsert(snapshot).await;
    }

    /// Executes a single task once a permit is available.
    ///
    /// The permit is held until the task body finishes, times out, or panics.
    async fn execute_task(
        task: Task,
        handler: Arc<dyn TaskHandler>,
        semaphore: Arc<Semaphore>,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> TaskOutcome {
        let permit = tokio::select! {
            biased;

            _ = cancel.cancelled() => return TaskOutcome::Skipped,
            permit = semaphore.acquire_owned() => permit,
        };
        let Ok(_permit) = permit else {
            return TaskOutcome::Stopped;
        };

        let result = AssertUnwindSafe(tokio::time::timeout(timeout, handler.handle(&task)))
            .catch_unwind()
            .await;

        let result = match result {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(TaskError::Timeout(timeout.as_secs())),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("Task panicked: {}, panic: {}", task, message);

                return TaskOutcome::Failed;
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!("Task completed: {}", task);
                TaskOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!("Task failed: {}, error: {}", task, e);
                TaskOutcome::Failed
            }
        }
    }
}

/// Records a task whose runner died outside the task body.
///
/// The task counts as failed and the batch is errored; a panicking task body never gets
/// here since `execute_task` catches it.
fn runner_failed(lifecycle: &mut BatchLifecycle, error: JoinError) {
    tracing::error!(
        "[Batches][{}] Task runner failed: {:?}",
        lifecycle.handle().id,
        error
    );

    lifecycle.task_failed();
    lifecycle.batch_error(BatchError::RunnerFailed {
        message: error.to_string(),
    });
}

/// Extracts the message of a caught panic.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
