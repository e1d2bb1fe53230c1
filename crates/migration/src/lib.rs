//! Migrator registering the collection tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_colorist;
mod m20240101_000002_create_client;
mod m20240101_000003_create_sheet;
mod m20240101_000004_create_hair_service;
mod m20240101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_colorist::Migration),
            Box::new(m20240101_000002_create_client::Migration),
            Box::new(m20240101_000003_create_sheet::Migration),
            Box::new(m20240101_000004_create_hair_service::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000005_add_indexes::Migration),
        ]
    }
}
