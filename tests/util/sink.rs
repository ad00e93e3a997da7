use std::sync::Mutex;

use heimdall::{
    batch::sink::{BatchRecord, BatchSink},
    model::batch::BatchId,
};

#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<BatchRecord>>,
}

impl RecordingSink {
    /// Records emitted for one batch, in emission order.
    pub fn records_for(&self, id: BatchId) -> Vec<BatchRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.handle_id() == id)
            .cloned()
            .collect()
    }
}

impl BatchSink for RecordingSink {
    fn emit(&self, record: BatchRecord) {
        self.records.lock().unwrap().push(record);
    }
}
