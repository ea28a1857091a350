//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last, the live-row unique indexes after the lookup ones.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_customer;
mod m20240601_000002_create_product;
mod m20240601_000003_create_product_offering;
mod m20240601_000004_create_customer_facing_service;
mod m20240601_000005_create_ticket;
mod m20240601_000010_add_indexes;
mod m20240601_000011_add_live_unique_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_customer::Migration),
            Box::new(m20240601_000002_create_product::Migration),
            Box::new(m20240601_000003_create_product_offering::Migration),
            Box::new(m20240601_000004_create_customer_facing_service::Migration),
            Box::new(m20240601_000005_create_ticket::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000010_add_indexes::Migration),
            Box::new(m20240601_000011_add_live_unique_indexes::Migration),
        ]
    }
}
