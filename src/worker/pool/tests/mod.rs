use std::{sync::Arc, time::Duration};

use crate::{
    batch::{builder::BatchBuilder, lifecycle::BatchLifecycle},
    error::{batch::BatchError, worker::WorkerError, Error},
    model::{
        batch::{BatchHandle, BatchState, BatchStats, Lane},
        credential::Credential,
        entity::EntityRef,
        task::{ArgShape, Task, TaskCategory, TaskSet},
    },
    registry::TaskRegistry,
    util::test::{
        handler::ScriptedTaskHandler,
        hooks::{HookCall, RecordingHooks},
        wait_for_finalized,
    },
    worker::{ExecutionBackend, PendingBatch, WorkerPool, WorkerPoolConfig},
};


fn test_config(max_concurrent_tasks: usize) -> WorkerPoolConfig {
    let mut config = WorkerPoolConfig::new(max_concurrent_tasks);
    config.poll_interval_ms = 5;
    config.shutdown_timeout_seconds = 1;
    config.cleanup_interval_ms = 50;
    config
}

fn create_test_pool(handler: Arc<ScriptedTaskHandler>) -> WorkerPool {
    WorkerPool::new(test_config(4), handler)
}

/// Task set of `categories` for a corporation, each built without a credential.
fn corporation_tasks(categories: &[TaskCategory]) -> (EntityRef, TaskSet) {
    let entity = EntityRef::corporation(98785281);
    let tasks = categories
        .iter()
        .map(|category| Task::new(entity, *category, ArgShape::EntityId, None))
        .collect::<Vec<_>>();

    (entity, TaskSet::from(tasks))
}

/// Character batch with the full authenticated task set.
fn character_batch(hooks: Arc<RecordingHooks>) -> PendingBatch {
    let entity = EntityRef::character(2114794365);
    let registry = TaskRegistry::standard();
    let credential = Arc::new(Credential::new(2114794365, "token", Vec::new()));
    let tasks = BatchBuilder::new(&registry).build(entity, Some(credential));

    PendingBatch::new(entity, tasks, hooks).allow_failures()
}
