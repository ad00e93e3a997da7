//! Shared fixtures for integration tests.

pub mod handler;
pub mod sink;

use std::{sync::Arc, time::Duration};

use heimdall::{
    batch::{dispatcher::BatchDispatcher, reporter::BatchReporter},
    model::batch::{BatchId, BatchSnapshot},
    registry::TaskRegistry,
    service::{resolver::EntityNameResolver, sync::EntitySyncService},
    worker::{WorkerPool, WorkerPoolConfig},
};
use sea_orm::DatabaseConnection;

use crate::util::{handler::FailingHandler, sink::RecordingSink};

/// Engine wired the way `startup` wires it, with a recording sink.
pub struct TestEngine {
    pub handler: Arc<FailingHandler>,
    pub pool: WorkerPool,
    pub sink: Arc<RecordingSink>,
    pub service: EntitySyncService,
}

impl TestEngine {
    /// Starts a pool running tasks through `handler` and builds the sync service over `db`.
    pub async fn start(db: DatabaseConnection, handler: FailingHandler) -> Self {
        let mut config = WorkerPoolConfig::new(8);
        config.poll_interval_ms = 5;
        config.shutdown_timeout_seconds = 1;

        let handler = Arc::new(handler);
        let pool = WorkerPool::new(config, handler.clone());
        pool.start().await.expect("Failed to start pool");

        let sink = Arc::new(RecordingSink::default());
        let dispatcher = BatchDispatcher::new(
            Arc::new(EntityNameResolver::new(db)),
            Arc::new(pool.clone()),
            Arc::new(BatchReporter::new(sink.clone())),
        );
        let service = EntitySyncService::new(TaskRegistry::standard(), dispatcher);

        Self {
            handler,
            pool,
            sink,
            service,
        }
    }

    /// Polls the pool until the batch is finalized.
    pub async fn wait_for_finalized(&self, id: BatchId) -> BatchSnapshot {
        for _ in 0..500 {
            if let Some(snapshot) = self.pool.find_batch(id).await {
                if snapshot.is_finished() {
                    return snapshot;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        panic!("Batch {} was not finalized in time", id);
    }
}
