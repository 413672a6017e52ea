//! Create gates table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gates::GateId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gates::CustomerId).string_len(50).not_null())
                    .col(ColumnDef::new(Gates::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Gates::Flow)
                            .string_len(10)
                            .not_null()
                            .default("both"),
                    )
                    .col(ColumnDef::new(Gates::Description).string_len(50))
                    .col(ColumnDef::new(Gates::CashierName).string_len(50))
                    .col(ColumnDef::new(Gates::CameraId).string_len(50))
                    .col(ColumnDef::new(Gates::CameraType).string_len(50))
                    .col(ColumnDef::new(Gates::CameraModel).string_len(50))
                    .col(ColumnDef::new(Gates::CameraIp).string_len(50))
                    .col(ColumnDef::new(Gates::CameraMac).string_len(50))
                    .col(ColumnDef::new(Gates::CameraManufacturer).string_len(50))
                    .col(
                        ColumnDef::new(Gates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gates_customer")
                            .from(Gates::Table, Gates::CustomerId)
                            .to(Customers::Table, Customers::CustomerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Gate names are unique per tenant
        manager
            .create_index(
                Index::create()
                    .name("idx_gates_customer_name")
                    .table(Gates::Table)
                    .col(Gates::CustomerId)
                    .col(Gates::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Gates {
    Table,
    GateId,
    CustomerId,
    Name,
    Flow,
    Description,
    CashierName,
    CameraId,
    CameraType,
    CameraModel,
    CameraIp,
    CameraMac,
    CameraManufacturer,
    CreatedAt,
}

#[derive(Iden)]
enum Customers {
    Table,
    CustomerId,
}
