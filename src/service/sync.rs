//! Entry point for synchronizing a single entity.

use std::sync::Arc;

use crate::{
    batch::{builder::BatchBuilder, dispatcher::BatchDispatcher},
    error::Error,
    model::{
        batch::BatchHandle,
        credential::Credential,
        entity::{EntityKind, EntityRef},
        task::TaskSet,
    },
    registry::TaskRegistry,
};

/// Builds and dispatches the synchronization batch of an entity.
#[derive(Clone)]
pub struct EntitySyncService {
    registry: Arc<TaskRegistry>,
    dispatcher: BatchDispatcher,
}

impl EntitySyncService {
    /// Creates a service building task sets from `registry`.
    pub fn new(registry: Arc<TaskRegistry>, dispatcher: BatchDispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Task set the service would dispatch for `entity`.
    pub fn build(&self, entity: EntityRef, credential: Option<Arc<Credential>>) -> TaskSet {
        BatchBuilder::new(&self.registry).build(entity, credential)
    }

    /// Synchronizes one entity.
    ///
    /// Public data is always collected; authenticated data only when a credential is given.
    /// Returns once the batch has been accepted, without waiting for any task.
    ///
    /// # Arguments
    /// - `kind` - Kind of entity
    /// - `id` - EVE Online ID of the entity
    /// - `credential` - Token with access to the entity's private data
    ///
    /// # Returns
    /// - `Ok(BatchHandle)` - Handle of the dispatched batch
    /// - `Err(Error)` - The name lookup failed or the backend rejected the batch
    pub async fn dispatch(
        &self,
        kind: EntityKind,
        id: i64,
        credential: Option<Credential>,
    ) -> Result<BatchHandle, Error> {
        let entity = EntityRef::new(kind, id);
        let tasks = self.build(entity, credential.map(Arc::new));

        tracing::debug!("Built {} task(s) for {}", tasks.len(), entity);

        self.dispatcher.dispatch(tasks, entity).await
    }
}
