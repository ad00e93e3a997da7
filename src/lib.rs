//! Batch synchronization engine for EVE Online entity data.
//!
//! Heimdall turns a request to synchronize one alliance, corporation, or character into a
//! named batch of independent data-collection tasks, runs the batch on a shared worker pool,
//! and reports the batch outcome exactly once. Individual task failures are absorbed and
//! counted rather than aborting sibling tasks.
//!
//! The HTTP client used by task bodies, token refresh, and the scheduler deciding which
//! entities to sync are supplied by the embedding application through
//! [`worker::handler::TaskHandler`] and [`service::sync::EntitySyncService`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod registry;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;
