//! Services composing the registry, batch machinery, and storage.
//!
//! [`sync::EntitySyncService`] is the entry point callers use to synchronize an entity.
//! [`resolver`] names batches after the entity they synchronize.

pub mod resolver;
pub mod sync;
