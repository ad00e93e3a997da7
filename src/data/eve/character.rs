use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Read access to `eve_character` records.
pub struct CharacterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterRepository<'a> {
    /// Creates a repository over `db`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a character using its EVE Online character ID
    pub async fn find_by_eve_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }
}
