//! Schema migrations, applied in order by [`Migrator`].

use sea_orm_migration::prelude::*;

mod m20250901_000001_create_customers_table;
mod m20250901_000002_create_vehicles_table;
mod m20250901_000003_create_services_table;
mod m20250901_000004_create_repair_orders_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_customers_table::Migration),
            Box::new(m20250901_000002_create_vehicles_table::Migration),
            Box::new(m20250901_000003_create_services_table::Migration),
            Box::new(m20250901_000004_create_repair_orders_table::Migration),
        ]
    }
}
