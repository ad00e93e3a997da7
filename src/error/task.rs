//! Task-level error types.
//!
//! A `TaskError` fails exactly one task. The worker pool counts it towards the batch's
//! failed total and keeps running the remaining tasks; it never reaches the caller of
//! `dispatch`.

use thiserror::Error;

use crate::model::task::TaskCategory;

/// Failure of a single data-collection task.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task's arguments require a credential but none was attached.
    #[error("Task category {0} requires a credential but none was provided")]
    MissingCredential(TaskCategory),

    /// The credential was rejected or lacks the scope for this category.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The remote API request failed.
    #[error("Request failed: {0}")]
    Request(String),

    /// The task exceeded the pool's per-task timeout.
    #[error("Task timed out after {0} seconds")]
    Timeout(u64),

    /// Persisting the fetched data failed.
    #[error(transparent)]
    Persistence(#[from] sea_orm::DbErr),
}
