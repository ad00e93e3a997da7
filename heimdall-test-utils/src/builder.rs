//! Declarative test builder.
//!
//! Configuration methods can be chained together; tables are created and fixtures inserted
//! during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    alliances: Vec<i64>,
    corporations: Vec<(i64, Option<i64>)>, // (corporation_id, alliance_id)
    characters: Vec<(i64, i64)>,           // (character_id, corporation_id)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the alliance, corporation, and character tables.
    pub fn with_entity_tables(self) -> Self {
        self.with_table(entity::prelude::EveAlliance)
            .with_table(entity::prelude::EveCorporation)
            .with_table(entity::prelude::EveCharacter)
    }

    /// Add an entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use heimdall_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), heimdall_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(EveAlliance)
    ///     .with_table(EveCorporation)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert mock alliance into database.
    pub fn with_mock_alliance(mut self, alliance_id: i64) -> Self {
        self.alliances.push(alliance_id);
        self
    }

    /// Insert mock corporation into database, creating its alliance if one is given.
    pub fn with_mock_corporation(mut self, corporation_id: i64, alliance_id: Option<i64>) -> Self {
        self.corporations.push((corporation_id, alliance_id));
        self
    }

    /// Insert mock character into database, creating its corporation.
    pub fn with_mock_character(mut self, character_id: i64, corporation_id: i64) -> Self {
        self.characters.push((character_id, corporation_id));
        self
    }

    /// Build the test context.
    ///
    /// Creates tables first, then inserts alliances, corporations, and characters in that order.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;
        setup.with_tables(self.tables).await?;

        for alliance_id in self.alliances {
            setup.eve().insert_mock_alliance(alliance_id).await?;
        }

        for (corporation_id, alliance_id) in self.corporations {
            setup
                .eve()
                .insert_mock_corporation(corporation_id, alliance_id)
                .await?;
        }

        for (character_id, corporation_id) in self.characters {
            setup
                .eve()
                .insert_mock_character(character_id, corporation_id)
                .await?;
        }

        Ok(setup)
    }
}
