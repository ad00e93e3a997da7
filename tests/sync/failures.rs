//! Tests for task failures during a dispatched batch.

use super::*;

/// Expect 1 failed task of 3 to produce only a finalize record with failed = 1
#[tokio::test]
async fn one_of_three_tasks_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entity_tables()
        .with_mock_character(2114794365, 98785281)
        .build()
        .await?;
    let engine = TestEngine::start(
        test.db.clone(),
        FailingHandler::new().failing(TaskCategory::Affiliation),
    )
    .await;

    let handle = engine
        .service
        .dispatch(EntityKind::Character, 2114794365, None)
        .await
        .expect("Dispatch should succeed");
    let snapshot = engine.wait_for_finalized(handle.id).await;

    assert_eq!(
        engine.sink.records_for(handle.id),
        vec![BatchRecord::Finalized {
            handle_id: handle.id,
            display_name: "Hyziri".to_string(),
            kind: EntityKind::Character,
            lane: Lane::Characters,
            succeeded_count: 2,
            failed_count: 1,
            total_count: 3,
        }]
    );
    assert_eq!(snapshot.state, BatchState::Finalized);
    assert!(snapshot.error.is_none());

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}

/// Expect a batch where every task fails to still finalize without an error record
#[tokio::test]
async fn all_tasks_fail_without_batch_error() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entity_tables().build().await?;
    let engine = TestEngine::start(
        test.db.clone(),
        FailingHandler::new()
            .failing(TaskCategory::Info)
            .failing(TaskCategory::AllianceHistory),
    )
    .await;

    let handle = engine
        .service
        .dispatch(EntityKind::Corporation, 98785281, None)
        .await
        .expect("Dispatch should succeed");
    engine.wait_for_finalized(handle.id).await;

    let records = engine.sink.records_for(handle.id);
    assert_eq!(records.len(), 1);
    assert!(matches!(
        records[0],
        BatchRecord::Finalized {
            succeeded_count: 0,
            failed_count: 2,
            total_count: 2,
            ..
        }
    ));

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}

/// Expect M failures out of a full authenticated character batch to finalize once
#[tokio::test]
async fn several_failures_in_authenticated_batch() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entity_tables().build().await?;
    let engine = TestEngine::start(
        test.db.clone(),
        FailingHandler::new()
            .failing(TaskCategory::WalletJournal)
            .failing(TaskCategory::Mails)
            .failing(TaskCategory::CalendarEventAttendees)
            .failing(TaskCategory::Info),
    )
    .await;
    let credential = Credential::new(2114794365, "token", Vec::new());

    let handle = engine
        .service
        .dispatch(EntityKind::Character, 2114794365, Some(credential))
        .await
        .expect("Dispatch should succeed");
    engine.wait_for_finalized(handle.id).await;

    let records = engine.sink.records_for(handle.id);
    assert_eq!(records.len(), 1, "Only the finalize record is emitted");
    assert!(matches!(
        records[0],
        BatchRecord::Finalized {
            succeeded_count: 35,
            failed_count: 4,
            total_count: 39,
            ..
        }
    ));

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}
