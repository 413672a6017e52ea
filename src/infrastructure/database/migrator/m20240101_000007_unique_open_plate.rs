//! Migration: at most one parked session per plate and tenant

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX: &str = "ux_parking_logs_open_plate";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Partial index; both SQLite and PostgreSQL accept the WHERE clause.
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} \
                 ON parking_logs (customer_id, plate_number) \
                 WHERE status = 'parked'",
                INDEX
            ))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX)
                    .table(ParkingLogs::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ParkingLogs {
    Table,
}
