//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_customers;
mod m20240101_000002_create_users;
mod m20240101_000003_create_gates;
mod m20240101_000004_create_tariffs;
mod m20240101_000005_create_subscriptions;
mod m20240101_000006_create_parking_logs;
mod m20240101_000007_unique_open_plate;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_gates::Migration),
            Box::new(m20240101_000004_create_tariffs::Migration),
            Box::new(m20240101_000005_create_subscriptions::Migration),
            Box::new(m20240101_000006_create_parking_logs::Migration),
            Box::new(m20240101_000007_unique_open_plate::Migration),
        ]
    }
}
