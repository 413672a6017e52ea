//! Create customers (tenants) table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::CustomerId)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::ClientType).string_len(70))
                    .col(ColumnDef::new(Customers::AdministratorId).integer())
                    .col(ColumnDef::new(Customers::CompanyName).string_len(50))
                    .col(ColumnDef::new(Customers::Email).string_len(70).unique_key())
                    .col(ColumnDef::new(Customers::Contact).string_len(30))
                    .col(ColumnDef::new(Customers::Address).string_len(50))
                    .col(ColumnDef::new(Customers::Geolocation).string_len(50))
                    .col(ColumnDef::new(Customers::Country).string_len(30))
                    .col(ColumnDef::new(Customers::Comments).string_len(500))
                    .col(ColumnDef::new(Customers::EnrollmentDate).date())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Customers {
    Table,
    CustomerId,
    ClientType,
    AdministratorId,
    CompanyName,
    Email,
    Contact,
    Address,
    Geolocation,
    Country,
    Comments,
    EnrollmentDate,
}
