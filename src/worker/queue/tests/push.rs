use super::*;
use crate::error::worker::WorkerError;

/// Expect Ok when pushing to an empty queue
#[tokio::test]
async fn pushes_to_lane_of_batch() {
    let queue = BatchQueue::new(10);

    let result = queue.push(queued(EntityRef::corporation(98000001))).await;

    assert!(result.is_ok());
    assert_eq!(queue.len(Lane::Corporations).await, 1);
    assert_eq!(queue.len(Lane::Public).await, 0);
    assert_eq!(queue.total_len().await, 1);
}

/// Expect Error when the queue is at capacity, counted across lanes
#[tokio::test]
async fn rejects_when_full() {
    let queue = BatchQueue::new(2);
    queue
        .push(queued(EntityRef::alliance(1)))
        .await
        .expect("Failed to push first batch");
    queue
        .push(queued(EntityRef::character(2)))
        .await
        .expect("Failed to push second batch");

    let result = queue.push(queued(EntityRef::corporation(3))).await;

    assert!(matches!(
        result,
        Err(WorkerError::QueueFull {
            lane: Lane::Corporations,
            capacity: 2
        })
    ));
    assert_eq!(queue.len(Lane::Corporations).await, 0);
}

/// Expect Error when pushing after the queue was closed
#[tokio::test]
async fn rejects_when_closed() {
    let queue = BatchQueue::new(10);
    queue.close().await;

    let result = queue.push(queued(EntityRef::alliance(1))).await;

    assert!(matches!(result, Err(WorkerError::BackendUnavailable)));
    assert!(queue.is_empty().await);
}
