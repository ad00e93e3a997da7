//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test environment backed by an in-memory SQLite database.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_table(entity::prelude::EveAlliance)
///     .with_mock_alliance(99013534)
///     .build()
///     .await?;
///
/// let db = &test.db;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Connects to a fresh in-memory SQLite database.
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self { db })
    }

    /// Executes table creation statements in order.
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
