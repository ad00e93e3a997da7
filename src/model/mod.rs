//! Domain types shared by the registry, batch orchestration, and worker pool.

pub mod batch;
pub mod credential;
pub mod entity;
pub mod task;
