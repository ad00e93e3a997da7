//! Test utilities for Heimdall.
//!
//! Provides [`TestBuilder`] for declaratively setting up an in-memory SQLite database with
//! the EVE entity tables and fixture records the entity name lookup reads from.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{TestBuilder, TestContext, TestError};
}
