//! Error types for the Heimdall synchronization engine.
//!
//! Errors are split by where they surface. [`Error`] is returned synchronously to callers
//! (configuration, registry construction, dispatch-time infrastructure failures).
//! [`task::TaskError`] is produced by individual task bodies and only ever counted, while
//! [`batch::BatchError`] describes failures of the batch machinery itself and is reported
//! through the batch lifecycle hooks.

pub mod batch;
pub mod config;
pub mod registry;
pub mod task;
pub mod worker;

use thiserror::Error;

use crate::error::{config::ConfigError, registry::RegistryError, worker::WorkerError};

/// Main error type for the Heimdall synchronization engine.
///
/// Aggregates the domain-specific error types and external library errors into a single
/// type, using `thiserror`'s `#[from]` attribute so the `?` operator converts automatically.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Task registry rejected its category tables.
    #[error(transparent)]
    RegistryError(#[from] RegistryError),
    /// Execution backend could not accept work.
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Database error (query failures, connection issues).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Flattens an error and its chain of sources into one line per cause.
///
/// The first entry is the error's own message, followed by each `source()` in order. Used to
/// attach a trace to batch-level error records without depending on backtraces being enabled.
pub fn error_trace(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut trace = vec![err.to_string()];
    let mut source = err.source();

    while let Some(cause) = source {
        trace.push(cause.to_string());
        source = cause.source();
    }

    trace
}
