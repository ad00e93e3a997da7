//! Entity name lookup for batch display names.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::eve::{
        alliance::AllianceRepository, character::CharacterRepository,
        corporation::CorporationRepository,
    },
    error::Error,
    model::entity::{EntityKind, EntityRef},
};

/// Display name of an entity, as used to name its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// Stored name, or the placeholder when the entity is unknown.
    pub name: String,
    /// Whether a stored record was found.
    pub known: bool,
}

impl ResolvedEntity {
    /// Name taken from a stored record.
    pub fn known(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            known: true,
        }
    }

    /// Placeholder for an entity without a stored record.
    pub fn placeholder(entity: EntityRef) -> Self {
        Self {
            name: entity.placeholder_name(),
            known: false,
        }
    }
}

/// Read-only entity lookup.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    /// Looks up the stored name of an entity, falling back to its placeholder.
    ///
    /// Never creates a record. Storage failures are returned, not hidden behind the
    /// placeholder.
    async fn find_or_placeholder(&self, entity: EntityRef) -> Result<ResolvedEntity, Error>;
}

/// Resolves names from the `eve_alliance`, `eve_corporation`, and `eve_character` tables.
#[derive(Clone)]
pub struct EntityNameResolver {
    db: DatabaseConnection,
}

impl EntityNameResolver {
    /// Creates a resolver reading from `db`.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntityResolver for EntityNameResolver {
    async fn find_or_placeholder(&self, entity: EntityRef) -> Result<ResolvedEntity, Error> {
        let name = match entity.kind {
            EntityKind::Alliance => AllianceRepository::new(&self.db)
                .find_by_eve_id(entity.id)
                .await?
                .map(|alliance| alliance.name),
            EntityKind::Corporation => CorporationRepository::new(&self.db)
                .find_by_eve_id(entity.id)
                .await?
                .map(|corporation| corporation.name),
            EntityKind::Character => CharacterRepository::new(&self.db)
                .find_by_eve_id(entity.id)
                .await?
                .map(|character| character.name),
        };

        Ok(match name {
            Some(name) => ResolvedEntity::known(name),
            None => ResolvedEntity::placeholder(entity),
        })
    }
}
