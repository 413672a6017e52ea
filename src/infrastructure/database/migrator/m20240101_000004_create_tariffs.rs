//! Create tariffs table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tariffs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tariffs::TariffId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tariffs::CustomerId).string_len(50).not_null())
                    .col(ColumnDef::new(Tariffs::FromMinutes).big_integer().not_null())
                    .col(ColumnDef::new(Tariffs::ToMinutes).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tariffs::Cost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tariffs::InitiatedBy).string_len(50))
                    .col(ColumnDef::new(Tariffs::Date).date().not_null())
                    .col(ColumnDef::new(Tariffs::LastUpdate).date())
                    .col(ColumnDef::new(Tariffs::UpdateLog).string_len(50))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tariffs_customer")
                            .from(Tariffs::Table, Tariffs::CustomerId)
                            .to(Customers::Table, Customers::CustomerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Bucket lookup filters on tenant + range
        manager
            .create_index(
                Index::create()
                    .name("idx_tariffs_customer_range")
                    .table(Tariffs::Table)
                    .col(Tariffs::CustomerId)
                    .col(Tariffs::FromMinutes)
                    .col(Tariffs::ToMinutes)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tariffs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tariffs {
    Table,
    TariffId,
    CustomerId,
    FromMinutes,
    ToMinutes,
    Cost,
    InitiatedBy,
    Date,
    LastUpdate,
    UpdateLog,
}

#[derive(Iden)]
enum Customers {
    Table,
    CustomerId,
}
