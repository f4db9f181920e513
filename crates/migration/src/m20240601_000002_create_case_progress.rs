//! Create `law_case_progress` table.
//!
//! One row per legal service engagement; `deleted_on != 0` marks a soft delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseProgress::Table)
                    .if_not_exists()
                    .col(pk_auto(CaseProgress::Id))
                    .col(string_len(CaseProgress::ServiceCode, 50))
                    .col(integer(CaseProgress::ServiceVersion))
                    .col(string_len(CaseProgress::LawyerCode, 50))
                    .col(string_len(CaseProgress::OpenId, 50))
                    .col(integer(CaseProgress::CaseType))
                    .col(integer(CaseProgress::CurrentStage))
                    .col(integer(CaseProgress::CaseStatus))
                    .col(big_integer(CaseProgress::CreatedOn).default(0))
                    .col(big_integer(CaseProgress::ModifiedOn).default(0))
                    .col(big_integer(CaseProgress::DeletedOn).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CaseProgress::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CaseProgress {
    #[sea_orm(iden = "law_case_progress")]
    Table,
    Id,
    ServiceCode,
    ServiceVersion,
    LawyerCode,
    OpenId,
    CaseType,
    CurrentStage,
    CaseStatus,
    CreatedOn,
    ModifiedOn,
    DeletedOn,
}
