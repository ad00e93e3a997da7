//! Submission of built task sets to the execution backend.

use std::sync::Arc;

use crate::{
    batch::reporter::BatchReporter,
    error::Error,
    model::{batch::BatchHandle, entity::EntityRef, task::TaskSet},
    service::resolver::EntityResolver,
    worker::{ExecutionBackend, PendingBatch},
};

/// Names a task set after its entity and submits it as one batch.
///
/// One dispatcher serves every entity kind; the kind only selects the lane.
#[derive(Clone)]
pub struct BatchDispatcher {
    resolver: Arc<dyn EntityResolver>,
    backend: Arc<dyn ExecutionBackend>,
    reporter: Arc<BatchReporter>,
}

impl BatchDispatcher {
    /// Creates a dispatcher.
    ///
    /// # Arguments
    /// - `resolver` - Looks up the entity's display name
    /// - `backend` - Accepts and runs the batch
    /// - `reporter` - Registered as the hooks of every dispatched batch
    pub fn new(
        resolver: Arc<dyn EntityResolver>,
        backend: Arc<dyn ExecutionBackend>,
        reporter: Arc<BatchReporter>,
    ) -> Self {
        Self {
            resolver,
            backend,
            reporter,
        }
    }

    /// Dispatches `tasks` as one batch for `entity`.
    ///
    /// Resolves the display name (placeholder when the entity is unknown), then submits the
    /// batch on the kind's lane with task failures allowed and the reporter attached as hooks.
    /// Returns as soon as the backend accepted the batch; nothing is retried.
    ///
    /// # Returns
    /// - `Ok(BatchHandle)` - Batch accepted; its hooks will fire exactly once
    /// - `Err(Error::DbErr)` - The name lookup failed; nothing was submitted
    /// - `Err(Error::WorkerError)` - The backend rejected the batch
    pub async fn dispatch(&self, tasks: TaskSet, entity: EntityRef) -> Result<BatchHandle, Error> {
        let resolved = self.resolver.find_or_placeholder(entity).await?;

        let batch = PendingBatch::new(entity, tasks, self.reporter.clone())
            .on_lane(entity.kind.lane())
            .name(resolved.name)
            .allow_failures();

        let handle = self.backend.submit(batch).await.map_err(|e| {
            tracing::error!("Failed to dispatch {} batch for {}: {}", entity.kind, entity, e);
            e
        })?;

        tracing::info!(
            "[Batches][{}] Dispatched {} batch \"{}\" ({} task(s)) on lane {}",
            handle.id,
            entity.kind,
            handle.name,
            handle.total_tasks,
            handle.lane
        );

        Ok(handle)
    }
}
