//! Entity references identifying what a batch synchronizes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::batch::Lane;

/// Kind of EVE Online entity that can be synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player alliance.
    Alliance,
    /// Player corporation.
    Corporation,
    /// Character.
    Character,
}

impl EntityKind {
    /// All entity kinds, in registry order.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Alliance,
        EntityKind::Corporation,
        EntityKind::Character,
    ];

    /// Human-readable name used in batch names and log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Alliance => "Alliance",
            EntityKind::Corporation => "Corporation",
            EntityKind::Character => "Character",
        }
    }

    /// Lane batches for this kind run on.
    ///
    /// Alliances share the `public` lane since they only carry a handful of tasks.
    pub fn lane(&self) -> Lane {
        match self {
            EntityKind::Alliance => Lane::Public,
            EntityKind::Corporation => Lane::Corporations,
            EntityKind::Character => Lane::Characters,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single entity by kind and EVE Online ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Kind of entity.
    pub kind: EntityKind,
    /// EVE Online ID of the entity.
    pub id: i64,
}

impl EntityRef {
    /// Creates a new entity reference.
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Reference to an alliance.
    pub fn alliance(alliance_id: i64) -> Self {
        Self::new(EntityKind::Alliance, alliance_id)
    }

    /// Reference to a corporation.
    pub fn corporation(corporation_id: i64) -> Self {
        Self::new(EntityKind::Corporation, corporation_id)
    }

    /// Reference to a character.
    pub fn character(character_id: i64) -> Self {
        Self::new(EntityKind::Character, character_id)
    }

    /// Name used for batches of an entity that is not yet known locally.
    ///
    /// # Examples
    /// ```
    /// use heimdall::model::entity::EntityRef;
    ///
    /// assert_eq!(EntityRef::alliance(99000001).placeholder_name(), "Unknown Alliance: 99000001");
    /// ```
    pub fn placeholder_name(&self) -> String {
        format!("Unknown {}: {}", self.kind, self.id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
