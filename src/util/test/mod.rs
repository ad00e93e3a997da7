//! Test doubles for the seams of the batch engine.

#![allow(missing_docs)]

pub mod resolver;

use std::time::Duration;

use crate::{
    model::batch::{BatchId, BatchSnapshot},
    worker::WorkerPool,
};

/// Polls the pool until the batch is finalized.
///
/// Panics if the batch is not finalized within 5 seconds.
pub async fn wait_for_finalized(pool: &WorkerPool, id: BatchId) -> BatchSnapshot {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);

    loop {
        if let Some(snapshot) = pool.find_batch(id).await {
            if snapshot.is_finished() {
                return snapshot;
            }
        }

        if tokio::time::Instant::now() >= deadline {
            panic!("Batch {} was not finalized in time", id);
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
