//! Create subscriptions table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::SubscriptionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CustomerId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::PlateNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::StartDate).date().not_null())
                    .col(ColumnDef::new(Subscriptions::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::SubscriptionType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Subscriptions::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Subscriptions::PhoneNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::Office).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Subscriptions::ParkingLot)
                            .string_len(50)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_customer")
                            .from(Subscriptions::Table, Subscriptions::CustomerId)
                            .to(Customers::Table, Customers::CustomerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_customer_plate")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::CustomerId)
                    .col(Subscriptions::PlateNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Subscriptions {
    Table,
    SubscriptionId,
    CustomerId,
    PlateNumber,
    StartDate,
    EndDate,
    SubscriptionType,
    Amount,
    Name,
    PhoneNumber,
    Office,
    ParkingLot,
}

#[derive(Iden)]
enum Customers {
    Table,
    CustomerId,
}
