//! Create `law_lawyer` table.
//!
//! Lawyer profiles; `lawyer_code` is unique across all rows (live or deleted),
//! `delete_time != 0` marks a soft-deleted profile.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lawyer::Table)
                    .if_not_exists()
                    .col(pk_auto(Lawyer::Id))
                    .col(string_len(Lawyer::LawyerCode, 50).unique_key())
                    .col(string_len(Lawyer::OpenId, 64))
                    .col(string_len(Lawyer::Name, 50))
                    .col(string_len(Lawyer::Avatar, 255).default(""))
                    .col(string_len(Lawyer::Phone, 20))
                    .col(string_len(Lawyer::Email, 100).default(""))
                    .col(string_len(Lawyer::LawFirm, 100).default(""))
                    .col(string_len(Lawyer::LicenseNo, 50).default(""))
                    .col(string_len(Lawyer::LegalField, 100).default(""))
                    .col(integer(Lawyer::PracticeYears).default(0))
                    .col(text(Lawyer::Introduction).default(""))
                    .col(integer(Lawyer::Status).default(1))
                    .col(integer(Lawyer::AuditStatus).default(0))
                    .col(string_len(Lawyer::AuditRemark, 255).default(""))
                    .col(big_integer(Lawyer::ViewCount).default(0))
                    .col(big_integer(Lawyer::LikeCount).default(0))
                    .col(integer(Lawyer::Version).default(1))
                    .col(string_len(Lawyer::CreateBy, 64).default(""))
                    .col(big_integer(Lawyer::CreateTime).default(0))
                    .col(string_len(Lawyer::UpdateBy, 64).default(""))
                    .col(big_integer(Lawyer::UpdateTime).default(0))
                    .col(string_len(Lawyer::DeleteBy, 64).default(""))
                    .col(big_integer(Lawyer::DeleteTime).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Lawyer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Lawyer {
    #[sea_orm(iden = "law_lawyer")]
    Table,
    Id,
    LawyerCode,
    OpenId,
    Name,
    Avatar,
    Phone,
    Email,
    LawFirm,
    LicenseNo,
    LegalField,
    PracticeYears,
    Introduction,
    Status,
    AuditStatus,
    AuditRemark,
    ViewCount,
    LikeCount,
    Version,
    CreateBy,
    CreateTime,
    UpdateBy,
    UpdateTime,
    DeleteBy,
    DeleteTime,
}
