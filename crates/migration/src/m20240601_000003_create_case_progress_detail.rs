//! Create `law_case_progress_detail` table with FK to `law_case_progress`.
//!
//! Append-only stage log of a progress record.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseProgressDetail::Table)
                    .if_not_exists()
                    .col(pk_auto(CaseProgressDetail::Id))
                    .col(integer(CaseProgressDetail::ProgressId))
                    .col(integer(CaseProgressDetail::Stage))
                    .col(text(CaseProgressDetail::Content))
                    .col(text(CaseProgressDetail::Attachments).default(""))
                    .col(big_integer(CaseProgressDetail::CreatedOn).default(0))
                    .col(big_integer(CaseProgressDetail::ModifiedOn).default(0))
                    .col(big_integer(CaseProgressDetail::DeletedOn).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_detail_progress")
                            .from(CaseProgressDetail::Table, CaseProgressDetail::ProgressId)
                            .to(CaseProgress::Table, CaseProgress::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CaseProgressDetail::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CaseProgressDetail {
    #[sea_orm(iden = "law_case_progress_detail")]
    Table,
    Id,
    ProgressId,
    Stage,
    Content,
    Attachments,
    CreatedOn,
    ModifiedOn,
    DeletedOn,
}

#[derive(DeriveIden)]
enum CaseProgress {
    #[sea_orm(iden = "law_case_progress")]
    Table,
    Id,
}
