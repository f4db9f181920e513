//! Create `merchant` table.
//!
//! Business listings with coordinates for nearby search.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Merchant::Table)
                    .if_not_exists()
                    .col(pk_auto(Merchant::Id))
                    .col(string_len(Merchant::Name, 100))
                    .col(string_len(Merchant::Logo, 255).default(""))
                    .col(string_len(Merchant::CoverImage, 255).default(""))
                    .col(string_len(Merchant::BusinessLicense, 255).default(""))
                    .col(string_len(Merchant::ContactName, 50).default(""))
                    .col(string_len(Merchant::ContactPhone, 20).default(""))
                    .col(string_len(Merchant::Province, 50).default(""))
                    .col(string_len(Merchant::City, 50).default(""))
                    .col(string_len(Merchant::District, 50).default(""))
                    .col(string_len(Merchant::Address, 255).default(""))
                    .col(double(Merchant::Longitude).default(0.0))
                    .col(double(Merchant::Latitude).default(0.0))
                    .col(double(Merchant::Rating).default(5.0))
                    .col(integer(Merchant::MonthSales).default(0))
                    .col(string_len(Merchant::BusinessHours, 100).default(""))
                    .col(integer(Merchant::TableCount).default(0))
                    .col(integer(Merchant::AdminId))
                    .col(integer(Merchant::Status).default(1))
                    .col(string_len(Merchant::Notice, 500).default(""))
                    .col(big_integer(Merchant::CreatedOn).default(0))
                    .col(big_integer(Merchant::ModifiedOn).default(0))
                    .col(big_integer(Merchant::DeletedOn).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Merchant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Merchant {
    Table,
    Id,
    Name,
    Logo,
    CoverImage,
    BusinessLicense,
    ContactName,
    ContactPhone,
    Province,
    City,
    District,
    Address,
    Longitude,
    Latitude,
    Rating,
    MonthSales,
    BusinessHours,
    TableCount,
    AdminId,
    Status,
    Notice,
    CreatedOn,
    ModifiedOn,
    DeletedOn,
}
