//! Tests for EntitySyncService::dispatch end to end.

use super::*;

/// Expect success and finalize records named after the stored alliance
#[tokio::test]
async fn known_alliance_with_credential() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entity_tables()
        .with_mock_alliance(99013534)
        .build()
        .await?;
    let engine = TestEngine::start(test.db.clone(), FailingHandler::new()).await;
    let credential = Credential::new(
        2114794365,
        "token",
        vec!["esi-alliances.read_contacts.v1".into()],
    );

    let handle = engine
        .service
        .dispatch(EntityKind::Alliance, 99013534, Some(credential))
        .await
        .expect("Dispatch should succeed");
    let snapshot = engine.wait_for_finalized(handle.id).await;

    assert_eq!(handle.lane, Lane::Public);
    assert_eq!(snapshot.stats.succeeded, 4);
    assert_eq!(
        engine.handler.seen(),
        vec![
            (TaskCategory::ContactLabels, true),
            (TaskCategory::Contacts, true),
            (TaskCategory::Info, false),
            (TaskCategory::Members, false),
        ]
    );
    assert_eq!(
        engine.sink.records_for(handle.id),
        vec![
            BatchRecord::Completed {
                handle_id: handle.id,
                display_name: "Autumn.".to_string(),
                kind: EntityKind::Alliance,
                lane: Lane::Public,
            },
            BatchRecord::Finalized {
                handle_id: handle.id,
                display_name: "Autumn.".to_string(),
                kind: EntityKind::Alliance,
                lane: Lane::Public,
                succeeded_count: 4,
                failed_count: 0,
                total_count: 4,
            },
        ]
    );

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}

/// Expect the placeholder name in the finalize record for an entity not stored locally
#[tokio::test]
async fn unknown_character_uses_placeholder() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entity_tables().build().await?;
    let engine = TestEngine::start(test.db.clone(), FailingHandler::new()).await;

    let handle = engine
        .service
        .dispatch(EntityKind::Character, 12345, None)
        .await
        .expect("Dispatch should succeed");
    engine.wait_for_finalized(handle.id).await;

    let records = engine.sink.records_for(handle.id);
    assert!(matches!(
        records.last(),
        Some(BatchRecord::Finalized { display_name, lane: Lane::Characters, total_count: 3, .. })
            if display_name == "Unknown Character: 12345"
    ));
    assert!(
        engine.handler.seen().iter().all(|(_, authenticated)| !authenticated),
        "No credential was given"
    );

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}

/// Expect every dispatch of the same entity to run as its own batch
#[tokio::test]
async fn repeated_dispatch_creates_distinct_batches() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entity_tables()
        .with_mock_corporation(98785281, None)
        .build()
        .await?;
    let engine = TestEngine::start(test.db.clone(), FailingHandler::new()).await;

    let first = engine
        .service
        .dispatch(EntityKind::Corporation, 98785281, None)
        .await
        .expect("Dispatch should succeed");
    let second = engine
        .service
        .dispatch(EntityKind::Corporation, 98785281, None)
        .await
        .expect("Dispatch should succeed");
    engine.wait_for_finalized(first.id).await;
    engine.wait_for_finalized(second.id).await;

    assert_ne!(first.id, second.id);
    assert_eq!(first.name, "The Order of Autumn");
    assert_eq!(engine.sink.records_for(first.id).len(), 2);
    assert_eq!(engine.sink.records_for(second.id).len(), 2);

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}

/// Expect Error and no records when the pool has been stopped
#[tokio::test]
async fn rejected_when_pool_stopped() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entity_tables().build().await?;
    let engine = TestEngine::start(test.db.clone(), FailingHandler::new()).await;
    engine.pool.stop().await.expect("Failed to stop pool");

    let result = engine
        .service
        .dispatch(EntityKind::Alliance, 99013534, None)
        .await;

    assert!(matches!(
        result,
        Err(Error::WorkerError(WorkerError::BackendUnavailable))
    ));
    Ok(())
}

/// Expect Error when the entity tables are missing, with nothing submitted
#[tokio::test]
async fn storage_failure_is_returned() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let engine = TestEngine::start(test.db.clone(), FailingHandler::new()).await;

    let result = engine
        .service
        .dispatch(EntityKind::Corporation, 98785281, None)
        .await;

    assert!(matches!(result, Err(Error::DbErr(_))));
    assert_eq!(engine.pool.queued_batches(Lane::Corporations).await, 0);

    engine.pool.stop().await.expect("Failed to stop pool");
    Ok(())
}
