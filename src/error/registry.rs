//! Task registry validation errors.

use thiserror::Error;

use crate::model::{entity::EntityKind, task::TaskCategory};

/// Errors raised when a task registry is built from inconsistent category tables.
///
/// An omitted or duplicated category silently changes what gets collected for an entity, so
/// custom registries are validated once up front instead of at dispatch time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Every entity kind needs at least one public category so a batch is never empty.
    #[error("{0} has no public task categories")]
    NoPublicCategories(EntityKind),

    /// A category appears more than once across a kind's public and authenticated lists.
    #[error("{kind} lists task category {category} more than once")]
    DuplicateCategory {
        /// Entity kind whose tables are inconsistent.
        kind: EntityKind,
        /// Offending category.
        category: TaskCategory,
    },

    /// A public category requires a credential, or an authenticated one does not.
    #[error("{kind} task category {category} is registered as {registered} but its arguments {expected}")]
    CredentialMismatch {
        /// Entity kind whose tables are inconsistent.
        kind: EntityKind,
        /// Offending category.
        category: TaskCategory,
        /// List the category was found in.
        registered: &'static str,
        /// What the category's argument shape actually needs.
        expected: &'static str,
    },
}
