//! Batch orchestration: building, dispatching, and reporting entity batches.
//!
//! - [`builder::BatchBuilder`] turns an entity and optional credential into a [`TaskSet`]
//!   using the task registry.
//! - [`dispatcher::BatchDispatcher`] names the batch, attaches the lifecycle hooks, and
//!   submits it to the execution backend on the entity kind's lane.
//! - [`lifecycle::BatchLifecycle`] is the per-batch outcome state machine driven by the
//!   backend, firing the [`BatchHooks`] exactly once in order.
//! - [`reporter::BatchReporter`] implements the hooks by emitting records to a
//!   [`sink::BatchSink`].
//!
//! [`TaskSet`]: crate::model::task::TaskSet

pub mod builder;
pub mod dispatcher;
pub mod lifecycle;
pub mod reporter;
pub mod sink;

use crate::{
    error::batch::BatchError,
    model::batch::{BatchHandle, BatchStats},
};

/// Observation points over a single batch's life.
///
/// For every accepted batch the backend calls either `on_success` (no task failed and no
/// batch-level error), `on_error` (a batch-level error occurred), or neither (tasks failed
/// but the machinery did not), and then `on_finalize` exactly once.
pub trait BatchHooks: Send + Sync {
    /// Every task in the batch succeeded.
    fn on_success(&self, batch: &BatchHandle);

    /// The batch machinery failed; task-level failures never reach this hook.
    fn on_error(&self, batch: &BatchHandle, error: &BatchError);

    /// The batch finished, whatever the outcome.
    fn on_finalize(&self, batch: &BatchHandle, stats: &BatchStats);
}
