use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use heimdall::{
    error::task::TaskError,
    model::task::{Task, TaskArgs, TaskCategory},
    worker::handler::TaskHandler,
};

/// Handler failing a fixed set of categories and recording the arguments it was given.
#[derive(Default)]
pub struct FailingHandler {
    failing: HashSet<TaskCategory>,
    seen: Mutex<Vec<(TaskCategory, bool)>>,
}

impl FailingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, category: TaskCategory) -> Self {
        self.failing.insert(category);
        self
    }

    /// Whether each handled category was given a credential, sorted by category name.
    pub fn seen(&self) -> Vec<(TaskCategory, bool)> {
        let mut seen = self.seen.lock().unwrap().clone();
        seen.sort_by_key(|(category, _)| category.as_str());
        seen
    }
}

#[async_trait]
impl TaskHandler for FailingHandler {
    async fn handle(&self, task: &Task) -> Result<(), TaskError> {
        let args = task.args()?;
        let authenticated = matches!(
            args,
            TaskArgs::Credential(_) | TaskArgs::EntityIdWithCredential(_, _)
        );
        self.seen
            .lock()
            .unwrap()
            .push((task.category(), authenticated));

        if self.failing.contains(&task.category()) {
            return Err(TaskError::Request(format!("{} returned 502", task)));
        }

        Ok(())
    }
}
