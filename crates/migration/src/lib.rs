//! Migrator registering entity-specific migrations in dependency order.
//! Unique indexes are applied last; repositories recover the colliding field
//! from their `uniq_<table>_<column>` names.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_service;
mod m20240101_000003_create_blog;
mod m20240101_000010_add_unique_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_service::Migration),
            Box::new(m20240101_000003_create_blog::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_unique_indexes::Migration),
        ]
    }
}
