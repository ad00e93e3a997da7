use std::sync::Arc;

use crate::{
    model::{credential::Credential, entity::EntityRef, task::TaskSet},
    registry::TaskRegistry,
};

/// Assembles the task set for one entity from the registry.
///
/// Building performs no I/O and cannot fail: credential problems surface as task failures at
/// execution time.
pub struct BatchBuilder<'a> {
    registry: &'a TaskRegistry,
}

impl<'a> BatchBuilder<'a> {
    /// Creates a builder reading from `registry`.
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self { registry }
    }

    /// Builds the task set for `entity`.
    ///
    /// Public categories always come first, in registry order. Authenticated categories
    /// follow, in registry order, only when `credential` is present. Categories are never
    /// deduplicated or reordered; the registry guarantees each appears once.
    ///
    /// # Arguments
    /// - `entity` - Entity to collect data for
    /// - `credential` - Token with access to the entity, shared by every authenticated task
    ///
    /// # Returns
    /// - `TaskSet` - Ordered tasks, never empty for a valid registry
    pub fn build(&self, entity: EntityRef, credential: Option<Arc<Credential>>) -> TaskSet {
        let table = self.registry.table(entity.kind);
        let mut tasks = TaskSet::new();

        for descriptor in table.public() {
            tasks.push(descriptor.instantiate(entity, None));
        }

        if let Some(credential) = credential.as_ref() {
            for descriptor in table.authenticated() {
                tasks.push(descriptor.instantiate(entity, Some(credential)));
            }
        }

        tasks
    }
}
