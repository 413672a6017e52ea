//! Create parking_logs table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingLogs::TicketId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingLogs::CustomerId).string_len(50).not_null())
                    .col(ColumnDef::new(ParkingLogs::Date).date().not_null())
                    .col(ColumnDef::new(ParkingLogs::PlateNumber).string_len(50).not_null())
                    .col(ColumnDef::new(ParkingLogs::EntryGate).string_len(50).not_null())
                    .col(ColumnDef::new(ParkingLogs::CheckinTime).big_integer().not_null())
                    .col(ColumnDef::new(ParkingLogs::CheckoutTime).big_integer())
                    .col(ColumnDef::new(ParkingLogs::ExitGate).string_len(50))
                    .col(
                        ColumnDef::new(ParkingLogs::Status)
                            .string_len(20)
                            .not_null()
                            .default("parked"),
                    )
                    .col(ColumnDef::new(ParkingLogs::DurationSeconds).big_integer())
                    .col(ColumnDef::new(ParkingLogs::Cash).big_integer())
                    .col(ColumnDef::new(ParkingLogs::SubscriptionId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_logs_customer")
                            .from(ParkingLogs::Table, ParkingLogs::CustomerId)
                            .to(Customers::Table, Customers::CustomerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Open-session lookups by plate
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_logs_customer_plate_status")
                    .table(ParkingLogs::Table)
                    .col(ParkingLogs::CustomerId)
                    .col(ParkingLogs::PlateNumber)
                    .col(ParkingLogs::Status)
                    .to_owned(),
            )
            .await?;

        // Revenue reports by day
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_logs_customer_date")
                    .table(ParkingLogs::Table)
                    .col(ParkingLogs::CustomerId)
                    .col(ParkingLogs::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingLogs {
    Table,
    TicketId,
    CustomerId,
    Date,
    PlateNumber,
    EntryGate,
    CheckinTime,
    CheckoutTime,
    ExitGate,
    Status,
    DurationSeconds,
    Cash,
    SubscriptionId,
}

#[derive(Iden)]
enum Customers {
    Table,
    CustomerId,
}
