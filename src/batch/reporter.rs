//! Lifecycle hooks that report batch outcomes to a [`BatchSink`].

use std::sync::Arc;

use crate::{
    batch::{
        sink::{BatchRecord, BatchSink},
        BatchHooks,
    },
    error::{batch::BatchError, error_trace},
    model::batch::{BatchHandle, BatchStats},
};

/// Reports batch outcomes as structured records.
///
/// Registered as the hooks of every dispatched batch. Holds no per-batch state, so a single
/// reporter is shared by all batches.
#[derive(Clone)]
pub struct BatchReporter {
    sink: Arc<dyn BatchSink>,
}

impl BatchReporter {
    /// Creates a reporter emitting to `sink`.
    pub fn new(sink: Arc<dyn BatchSink>) -> Self {
        Self { sink }
    }
}

impl BatchHooks for BatchReporter {
    fn on_success(&self, batch: &BatchHandle) {
        self.sink.emit(BatchRecord::Completed {
            handle_id: batch.id,
            display_name: batch.name.clone(),
            kind: batch.entity.kind,
            lane: batch.lane,
        });
    }

    fn on_error(&self, batch: &BatchHandle, error: &BatchError) {
        self.sink.emit(BatchRecord::Errored {
            handle_id: batch.id,
            display_name: batch.name.clone(),
            kind: batch.entity.kind,
            lane: batch.lane,
            error_message: error.to_string(),
            error_trace: error_trace(error),
        });
    }

    fn on_finalize(&self, batch: &BatchHandle, stats: &BatchStats) {
        self.sink.emit(BatchRecord::Finalized {
            handle_id: batch.id,
            display_name: batch.name.clone(),
            kind: batch.entity.kind,
            lane: batch.lane,
            succeeded_count: stats.succeeded,
            failed_count: stats.failed,
            total_count: stats.total,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        batch::{reporter::BatchReporter, sink::BatchRecord, BatchHooks},
        error::batch::BatchError,
        model::{
            batch::{BatchHandle, BatchStats, Lane},
            entity::EntityRef,
        },
        util::test::sink::RecordingSink,
    };

    fn setup() -> (Arc<RecordingSink>, BatchReporter, BatchHandle) {
        let sink = Arc::new(RecordingSink::default());
        let reporter = BatchReporter::new(sink.clone());
        let handle = BatchHandle::new(
            "Autumn Order".to_string(),
            Lane::Public,
            EntityRef::alliance(99013534),
            4,
        );

        (sink, reporter, handle)
    }

    #[test]
    fn success_emits_completed_record() {
        let (sink, reporter, handle) = setup();

        reporter.on_success(&handle);

        assert_eq!(
            sink.records(),
            vec![BatchRecord::Completed {
                handle_id: handle.id,
                display_name: "Autumn Order".to_string(),
                kind: handle.entity.kind,
                lane: Lane::Public,
            }]
        );
    }

    #[test]
    fn error_record_carries_message_and_trace() {
        let (sink, reporter, handle) = setup();
        let error = BatchError::PoolStopped { remaining: 4 };

        reporter.on_error(&handle, &error);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        match &records[0] {
            BatchRecord::Errored {
                error_message,
                error_trace,
                ..
            } => {
                assert_eq!(error_message, &error.to_string());
                assert_eq!(error_trace, &vec![error.to_string()]);
            }
            other => panic!("expected errored record, got {:?}", other),
        }
    }

    #[test]
    fn finalize_emits_counts() {
        let (sink, reporter, handle) = setup();
        let stats = BatchStats {
            succeeded: 3,
            failed: 1,
            total: 4,
        };

        reporter.on_finalize(&handle, &stats);

        assert_eq!(
            sink.records(),
            vec![BatchRecord::Finalized {
                handle_id: handle.id,
                display_name: "Autumn Order".to_string(),
                kind: handle.entity.kind,
                lane: Lane::Public,
                succeeded_count: 3,
                failed_count: 1,
                total_count: 4,
            }]
        );
    }
}
