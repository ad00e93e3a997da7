//! Per-entity-kind registry of task categories.
//!
//! The registry is a declarative table: for each [`EntityKind`] an ordered list of public
//! categories (no credential needed) and authenticated categories (credential needed). The
//! batch builder reads it to assemble a batch, so the build/dispatch logic never changes
//! when categories are added.
//!
//! Omitting a category drops its data collection without any visible error, so the
//! standard tables are covered by tests and custom registries are validated by
//! [`TaskRegistry::new`].

mod alliance;
mod character;
mod corporation;

use std::{
    collections::HashSet,
    sync::{Arc, OnceLock},
};

use crate::{
    error::registry::RegistryError,
    model::{
        credential::Credential,
        entity::{EntityKind, EntityRef},
        task::{ArgShape, Task, TaskCategory},
    },
};

/// Metadata needed to instantiate a task of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    /// Category of data the task collects.
    pub category: TaskCategory,
    /// Arguments the task's constructor takes.
    pub shape: ArgShape,
}

impl CategoryDescriptor {
    /// Creates a descriptor.
    pub const fn new(category: TaskCategory, shape: ArgShape) -> Self {
        Self { category, shape }
    }

    /// Whether tasks of this category need a credential.
    pub fn requires_credential(&self) -> bool {
        self.shape.requires_credential()
    }

    /// Creates a task of this category for `entity`.
    ///
    /// The credential is only attached when the category's arguments need one, so public
    /// tasks never hold a token even when the batch has one.
    pub fn instantiate(&self, entity: EntityRef, credential: Option<&Arc<Credential>>) -> Task {
        let credential = if self.requires_credential() {
            credential.cloned()
        } else {
            None
        };

        Task::new(entity, self.category, self.shape, credential)
    }
}

/// Public and authenticated categories of one entity kind, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTable {
    public: Vec<CategoryDescriptor>,
    authenticated: Vec<CategoryDescriptor>,
}

impl KindTable {
    /// Creates a table from its two ordered category lists.
    pub fn new(public: Vec<CategoryDescriptor>, authenticated: Vec<CategoryDescriptor>) -> Self {
        Self {
            public,
            authenticated,
        }
    }

    /// Categories that run without a credential.
    pub fn public(&self) -> &[CategoryDescriptor] {
        &self.public
    }

    /// Categories that only run with a credential.
    pub fn authenticated(&self) -> &[CategoryDescriptor] {
        &self.authenticated
    }

    fn validate(&self, kind: EntityKind) -> Result<(), RegistryError> {
        if self.public.is_empty() {
            return Err(RegistryError::NoPublicCategories(kind));
        }

        let mut seen = HashSet::new();

        for descriptor in &self.public {
            if descriptor.requires_credential() {
                return Err(RegistryError::CredentialMismatch {
                    kind,
                    category: descriptor.category,
                    registered: "public",
                    expected: "require a credential",
                });
            }
            if !seen.insert(descriptor.category) {
                return Err(RegistryError::DuplicateCategory {
                    kind,
                    category: descriptor.category,
                });
            }
        }

        for descriptor in &self.authenticated {
            if !descriptor.requires_credential() {
                return Err(RegistryError::CredentialMismatch {
                    kind,
                    category: descriptor.category,
                    registered: "authenticated",
                    expected: "do not take a credential",
                });
            }
            if !seen.insert(descriptor.category) {
                return Err(RegistryError::DuplicateCategory {
                    kind,
                    category: descriptor.category,
                });
            }
        }

        Ok(())
    }
}

/// Category tables for every entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistry {
    alliance: KindTable,
    corporation: KindTable,
    character: KindTable,
}

impl TaskRegistry {
    /// Creates a registry after validating each kind's table.
    ///
    /// # Returns
    /// - `Ok(TaskRegistry)` - Every kind has at least one public category, no category is
    ///   listed twice for a kind, and credential requirements match the list they are in
    /// - `Err(RegistryError)` - The first table inconsistency found
    pub fn new(
        alliance: KindTable,
        corporation: KindTable,
        character: KindTable,
    ) -> Result<Self, RegistryError> {
        alliance.validate(EntityKind::Alliance)?;
        corporation.validate(EntityKind::Corporation)?;
        character.validate(EntityKind::Character)?;

        Ok(Self {
            alliance,
            corporation,
            character,
        })
    }

    /// The standard registry, built once per process and shared read-only.
    pub fn standard() -> Arc<TaskRegistry> {
        static STANDARD: OnceLock<Arc<TaskRegistry>> = OnceLock::new();

        STANDARD
            .get_or_init(|| {
                Arc::new(TaskRegistry {
                    alliance: KindTable::new(
                        alliance::PUBLIC.to_vec(),
                        alliance::AUTHENTICATED.to_vec(),
                    ),
                    corporation: KindTable::new(
                        corporation::PUBLIC.to_vec(),
                        corporation::AUTHENTICATED.to_vec(),
                    ),
                    character: KindTable::new(
                        character::PUBLIC.to_vec(),
                        character::AUTHENTICATED.to_vec(),
                    ),
                })
            })
            .clone()
    }

    /// Table of one entity kind.
    pub fn table(&self, kind: EntityKind) -> &KindTable {
        match kind {
            EntityKind::Alliance => &self.alliance,
            EntityKind::Corporation => &self.corporation,
            EntityKind::Character => &self.character,
        }
    }

    /// Public categories of `kind`, in registration order.
    pub fn public_categories(&self, kind: EntityKind) -> &[CategoryDescriptor] {
        self.table(kind).public()
    }

    /// Authenticated categories of `kind`, in registration order.
    pub fn authenticated_categories(&self, kind: EntityKind) -> &[CategoryDescriptor] {
        self.table(kind).authenticated()
    }
}

#[cfg(test)]
mod tests;
