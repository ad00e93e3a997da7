//! Queryable record of submitted batches.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::model::batch::{BatchId, BatchSnapshot};

/// Latest snapshot of every batch the pool has accepted.
///
/// Finalized snapshots are kept until [`prune_finished`](Self::prune_finished) removes them.
#[derive(Default)]
pub struct BatchStore {
    batches: RwLock<HashMap<BatchId, BatchSnapshot>>,
}

impl BatchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot of a batch.
    ///
    /// A finalized snapshot is never replaced by a non-finalized one.
    pub async fn upsert(&self, snapshot: BatchSnapshot) {
        let mut batches = self.batches.write().await;

        if let Some(existing) = batches.get(&snapshot.handle.id) {
            if existing.is_finished() && !snapshot.is_finished() {
                return;
            }
        }

        batches.insert(snapshot.handle.id, snapshot);
    }

    /// Snapshot of a batch, if it is known.
    pub async fn get(&self, id: BatchId) -> Option<BatchSnapshot> {
        self.batches.read().await.get(&id).cloned()
    }

    /// Removes a batch, returning its last snapshot.
    pub async fn remove(&self, id: BatchId) -> Option<BatchSnapshot> {
        self.batches.write().await.remove(&id)
    }

    /// Number of batches tracked.
    pub async fn len(&self) -> usize {
        self.batches.read().await.len()
    }

    /// Whether no batch is tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes finalized batches that finished more than `ttl` ago.
    ///
    /// # Returns
    /// - `usize` - Number of snapshots removed
    pub async fn prune_finished(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let mut batches = self.batches.write().await;
        let before = batches.len();

        batches.retain(|_, snapshot| match snapshot.finished_at {
            Some(finished_at) if snapshot.is_finished() => finished_at > cutoff,
            _ => true,
        });

        before - batches.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::{
        model::{
            batch::{BatchHandle, BatchSnapshot, BatchState, Lane},
            entity::EntityRef,
        },
        worker::store::BatchStore,
    };

    fn submitted() -> BatchSnapshot {
        BatchSnapshot::submitted(BatchHandle::new(
            "Autumn Order".to_string(),
            Lane::Public,
            EntityRef::alliance(99013534),
            4,
        ))
    }

    fn finalized(from: &BatchSnapshot, finished_ago: Duration) -> BatchSnapshot {
        let mut snapshot = from.clone();
        snapshot.state = BatchState::Finalized;
        snapshot.finished_at = Some(Utc::now() - finished_ago);
        snapshot
    }

    #[tokio::test]
    async fn get_returns_latest_snapshot() {
        let store = BatchStore::new();
        let snapshot = submitted();
        store.upsert(snapshot.clone()).await;

        let mut running = snapshot.clone();
        running.state = BatchState::Running;
        store.upsert(running).await;

        let stored = store
            .get(snapshot.handle.id)
            .await
            .expect("Expected batch to be stored");
        assert_eq!(stored.state, BatchState::Running);
    }

    /// Expect a finalized snapshot to never be overwritten by a stale progress update
    #[tokio::test]
    async fn finalized_snapshot_is_not_regressed() {
        let store = BatchStore::new();
        let snapshot = submitted();
        store.upsert(finalized(&snapshot, Duration::zero())).await;

        store.upsert(snapshot.clone()).await;

        let stored = store
            .get(snapshot.handle.id)
            .await
            .expect("Expected batch to be stored");
        assert!(stored.is_finished());
    }

    #[tokio::test]
    async fn prune_removes_only_expired_finished_batches() {
        let store = BatchStore::new();
        let pending = submitted();
        let expired = finalized(&submitted(), Duration::hours(2));
        let recent = finalized(&submitted(), Duration::seconds(5));
        store.upsert(pending.clone()).await;
        store.upsert(expired.clone()).await;
        store.upsert(recent.clone()).await;

        let removed = store.prune_finished(Duration::hours(1)).await;

        assert_eq!(removed, 1);
        assert!(store.get(expired.handle.id).await.is_none());
        assert!(store.get(recent.handle.id).await.is_some());
        assert!(store.get(pending.handle.id).await.is_some());
    }

    #[tokio::test]
    async fn unknown_batch_is_none() {
        let store = BatchStore::new();

        assert!(store.get(uuid::Uuid::new_v4()).await.is_none());
        assert!(store.is_empty().await);
    }
}
