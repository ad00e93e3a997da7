//! In-process execution backend for dispatched batches.
//!
//! The [`WorkerPool`] accepts [`PendingBatch`]es, queues them per [`Lane`] in the
//! [`BatchQueue`](queue::BatchQueue), and runs each batch's tasks concurrently through the
//! injected [`TaskHandler`](handler::TaskHandler), bounded by a single semaphore shared by
//! every batch. Batch snapshots are kept in the [`BatchStore`](store::BatchStore) so batches
//! stay queryable after submission.

pub mod handler;
pub mod pool;
pub mod queue;
pub mod store;

pub use pool::{WorkerPool, WorkerPoolConfig};

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    batch::BatchHooks,
    error::Error,
    model::{
        batch::{BatchHandle, Lane},
        entity::EntityRef,
        task::TaskSet,
    },
};

/// Backend that accepts batches and executes them asynchronously.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Accepts a batch as a single unit of work.
    ///
    /// Either the whole batch is enqueued and a handle is returned, or nothing is enqueued
    /// and an error is returned. Never waits for the batch to run.
    async fn submit(&self, batch: PendingBatch) -> Result<BatchHandle, Error>;
}

/// Batch ready to be submitted to an [`ExecutionBackend`].
///
/// Hooks are attached at construction so they are always registered before submission.
pub struct PendingBatch {
    entity: EntityRef,
    tasks: TaskSet,
    lane: Lane,
    name: String,
    allow_failures: bool,
    hooks: Arc<dyn BatchHooks>,
}

impl PendingBatch {
    /// Creates a batch on the entity kind's lane, named with the entity's placeholder name.
    ///
    /// Task failures cancel the rest of the batch unless [`allow_failures`](Self::allow_failures)
    /// is set.
    pub fn new(entity: EntityRef, tasks: TaskSet, hooks: Arc<dyn BatchHooks>) -> Self {
        Self {
            entity,
            tasks,
            lane: entity.kind.lane(),
            name: entity.placeholder_name(),
            allow_failures: false,
            hooks,
        }
    }

    /// Runs the batch on `lane`.
    pub fn on_lane(mut self, lane: Lane) -> Self {
        self.lane = lane;
        self
    }

    /// Sets the display name of the batch.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Keeps running the remaining tasks when a task fails.
    pub fn allow_failures(mut self) -> Self {
        self.allow_failures = true;
        self
    }

    /// Entity the batch synchronizes.
    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    /// Tasks of the batch.
    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    /// Lane the batch runs on.
    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Display name of the batch.
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Whether task failures leave sibling tasks running.
    pub fn failures_allowed(&self) -> bool {
        self.allow_failures
    }

    /// Lifecycle hooks of the batch.
    pub fn hooks(&self) -> &Arc<dyn BatchHooks> {
        &self.hooks
    }

    /// Splits the batch into its tasks and hooks once a handle has been issued.
    pub(crate) fn into_parts(self) -> (TaskSet, bool, Arc<dyn BatchHooks>) {
        (self.tasks, self.allow_failures, self.hooks)
    }
}

impl std::fmt::Debug for PendingBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingBatch")
            .field("entity", &self.entity)
            .field("tasks", &self.tasks.len())
            .field("lane", &self.lane)
            .field("name", &self.name)
            .field("allow_failures", &self.allow_failures)
            .finish()
    }
}
