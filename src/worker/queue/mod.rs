//! In-memory batch queue with one FIFO per lane.
//!
//! A queued entry is a whole batch, so pushing is atomic per batch: either every task of the
//! batch is enqueued or none is. The queue is bounded across all lanes by the configured
//! capacity, and closing it rejects further pushes and hands back whatever was still queued.

#[cfg(test)]
mod tests;

use std::collections::{HashMap, VecDeque};

use tokio::sync::Mutex;

use crate::{
    error::worker::WorkerError,
    model::batch::{BatchHandle, Lane},
    worker::PendingBatch,
};

/// Batch accepted by the pool, waiting on its lane.
#[derive(Debug)]
pub struct QueuedBatch {
    /// Handle issued for the batch.
    pub handle: BatchHandle,
    /// The batch itself.
    pub batch: PendingBatch,
}

struct QueueState {
    lanes: HashMap<Lane, VecDeque<QueuedBatch>>,
    queued: usize,
    closed: bool,
}

/// Bounded per-lane FIFO of batches.
pub struct BatchQueue {
    capacity: usize,
    state: Mutex<QueueState>,
}

impl BatchQueue {
    /// Creates an empty queue holding at most `capacity` batches across all lanes.
    pub fn new(capacity: usize) -> Self {
        let lanes = Lane::ALL
            .iter()
            .map(|lane| (*lane, VecDeque::new()))
            .collect();

        Self {
            capacity,
            state: Mutex::new(QueueState {
                lanes,
                queued: 0,
                closed: false,
            }),
        }
    }

    /// Maximum number of batches the queue holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a batch to the back of its lane.
    ///
    /// # Returns
    /// - `Ok(())` - Batch enqueued
    /// - `Err(WorkerError::QueueFull)` - Queue is at capacity
    /// - `Err(WorkerError::BackendUnavailable)` - Queue has been closed
    pub async fn push(&self, entry: QueuedBatch) -> Result<(), WorkerError> {
        let mut state = self.state.lock().await;

        if state.closed {
            return Err(WorkerError::BackendUnavailable);
        }

        let lane = entry.handle.lane;
        if state.queued >= self.capacity {
            return Err(WorkerError::QueueFull {
                lane,
                capacity: self.capacity,
            });
        }

        state.lanes.entry(lane).or_default().push_back(entry);
        state.queued += 1;

        Ok(())
    }

    /// Removes the oldest batch of `lane`, if any.
    pub async fn pop(&self, lane: Lane) -> Option<QueuedBatch> {
        let mut state = self.state.lock().await;

        let entry = state.lanes.get_mut(&lane)?.pop_front()?;
        state.queued -= 1;

        Some(entry)
    }

    /// Number of batches waiting on `lane`.
    pub async fn len(&self, lane: Lane) -> usize {
        let state = self.state.lock().await;

        state.lanes.get(&lane).map_or(0, VecDeque::len)
    }

    /// Number of batches waiting across all lanes.
    pub async fn total_len(&self) -> usize {
        self.state.lock().await.queued
    }

    /// Whether no batch is waiting on any lane.
    pub async fn is_empty(&self) -> bool {
        self.total_len().await == 0
    }

    /// Whether the queue has been closed.
    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    /// Closes the queue and drains every lane.
    ///
    /// Subsequent pushes fail with [`WorkerError::BackendUnavailable`]. Returns the batches
    /// that were still queued, oldest first within each lane, lanes in [`Lane::ALL`] order.
    pub async fn close(&self) -> Vec<QueuedBatch> {
        let mut state = self.state.lock().await;
        state.closed = true;
        state.queued = 0;

        let mut drained = Vec::new();
        for lane in Lane::ALL {
            if let Some(entries) = state.lanes.get_mut(&lane) {
                drained.extend(entries.drain(..));
            }
        }

        drained
    }
}
