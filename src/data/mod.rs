//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. The synchronization
//! engine only reads from them, to name batches after the entity they synchronize.

pub mod eve;
