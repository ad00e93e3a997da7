//! EVE entity database insertion utilities.
//!
//! Each insert is idempotent: if a record with the EVE ID already exists it is returned
//! instead of inserting a duplicate.

use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    constant::{
        MOCK_ALLIANCE_NAME, MOCK_ALLIANCE_TICKER, MOCK_CHARACTER_NAME, MOCK_CORPORATION_NAME,
        MOCK_CORPORATION_TICKER,
    },
    error::TestError,
    TestContext,
};

impl TestContext {
    /// EVE entity fixtures for this context.
    pub fn eve(&self) -> EveFixtures<'_> {
        EveFixtures { setup: self }
    }
}

pub struct EveFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> EveFixtures<'a> {
    /// Insert a mock alliance into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing alliance record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_alliance(
        &self,
        alliance_id: i64,
    ) -> Result<entity::eve_alliance::Model, TestError> {
        if let Some(existing) = entity::prelude::EveAlliance::find()
            .filter(entity::eve_alliance::Column::AllianceId.eq(alliance_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::EveAlliance::insert(entity::eve_alliance::ActiveModel {
                alliance_id: ActiveValue::Set(alliance_id),
                name: ActiveValue::Set(MOCK_ALLIANCE_NAME.to_string()),
                ticker: ActiveValue::Set(MOCK_ALLIANCE_TICKER.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a mock corporation into the database.
    ///
    /// If an alliance ID is provided the alliance is created too when missing.
    pub async fn insert_mock_corporation(
        &self,
        corporation_id: i64,
        alliance_id: Option<i64>,
    ) -> Result<entity::eve_corporation::Model, TestError> {
        if let Some(existing) = entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        if let Some(alliance_id) = alliance_id {
            self.insert_mock_alliance(alliance_id).await?;
        }

        Ok(
            entity::prelude::EveCorporation::insert(entity::eve_corporation::ActiveModel {
                corporation_id: ActiveValue::Set(corporation_id),
                alliance_id: ActiveValue::Set(alliance_id),
                name: ActiveValue::Set(MOCK_CORPORATION_NAME.to_string()),
                ticker: ActiveValue::Set(MOCK_CORPORATION_TICKER.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a mock character into the database, creating its corporation when missing.
    pub async fn insert_mock_character(
        &self,
        character_id: i64,
        corporation_id: i64,
    ) -> Result<entity::eve_character::Model, TestError> {
        if let Some(existing) = entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        self.insert_mock_corporation(corporation_id, None).await?;

        Ok(
            entity::prelude::EveCharacter::insert(entity::eve_character::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                corporation_id: ActiveValue::Set(corporation_id),
                name: ActiveValue::Set(MOCK_CHARACTER_NAME.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
