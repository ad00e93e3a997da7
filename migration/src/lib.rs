pub use sea_orm_migration::prelude::*;

mod m20251104_000001_eve_alliance;
mod m20251104_000002_eve_corporation;
mod m20251104_000003_eve_character;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251104_000001_eve_alliance::Migration),
            Box::new(m20251104_000002_eve_corporation::Migration),
            Box::new(m20251104_000003_eve_character::Migration),
        ]
    }
}
