use std::sync::Arc;

use crate::{
    model::{
        batch::{BatchHandle, Lane},
        entity::EntityRef,
        task::TaskSet,
    },
    util::test::hooks::RecordingHooks,
    worker::{
        queue::{BatchQueue, QueuedBatch},
        PendingBatch,
    },
};

mod push;

fn queued(entity: EntityRef) -> QueuedBatch {
    let batch = PendingBatch::new(entity, TaskSet::new(), Arc::new(RecordingHooks::default()));
    let handle = BatchHandle::new(
        batch.display_name().to_string(),
        batch.lane(),
        entity,
        batch.tasks().len(),
    );

    QueuedBatch { handle, batch }
}
