//! Task execution seam.

use async_trait::async_trait;

use crate::{error::task::TaskError, model::task::Task};

/// Executes the body of a single task.
///
/// Implementations perform the remote fetch and persistence for the task's category. An
/// `Err` marks the task as failed; it never fails the batch. Use [`Task::args`] to get the
/// constructor arguments in the task's registered shape.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Runs the task to completion.
    async fn handle(&self, task: &Task) -> Result<(), TaskError>;
}
