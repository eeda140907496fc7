//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and are written with
//! the portable schema DSL, so the same schema runs on PostgreSQL in
//! production and on SQLite in the integration tests.

pub use sea_orm_migration::prelude::*;

mod m20260825_000001_initial;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260825_000001_initial::Migration)]
    }
}
