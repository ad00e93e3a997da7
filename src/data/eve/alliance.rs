use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Read access to `eve_alliance` records.
pub struct AllianceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AllianceRepository<'a> {
    /// Creates a repository over `db`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a alliance using its EVE Online alliance ID
    pub async fn find_by_eve_id(
        &self,
        alliance_id: i64,
    ) -> Result<Option<entity::eve_alliance::Model>, DbErr> {
        entity::prelude::EveAlliance::find()
            .filter(entity::eve_alliance::Column::AllianceId.eq(alliance_id))
            .one(self.db)
            .await
    }
}
