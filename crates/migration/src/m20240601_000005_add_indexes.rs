use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lawyer: one live profile per owner; deleted rows carry a non-zero delete_time
        manager
            .create_index(
                Index::create()
                    .name("uk_lawyer_open_id_live")
                    .table(Lawyer::Table)
                    .col(Lawyer::OpenId)
                    .col(Lawyer::DeleteTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // CaseProgress: list filters
        manager
            .create_index(
                Index::create()
                    .name("idx_case_progress_lawyer_code")
                    .table(CaseProgress::Table)
                    .col(CaseProgress::LawyerCode)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_case_progress_open_id")
                    .table(CaseProgress::Table)
                    .col(CaseProgress::OpenId)
                    .to_owned(),
            )
            .await?;

        // Detail: history by parent
        manager
            .create_index(
                Index::create()
                    .name("idx_progress_detail_progress")
                    .table(CaseProgressDetail::Table)
                    .col(CaseProgressDetail::ProgressId)
                    .col(CaseProgressDetail::CreatedOn)
                    .to_owned(),
            )
            .await?;

        // Merchant: bounding-box prefilter of the nearby query
        manager
            .create_index(
                Index::create()
                    .name("idx_merchant_lat_lng")
                    .table(Merchant::Table)
                    .col(Merchant::Latitude)
                    .col(Merchant::Longitude)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uk_lawyer_open_id_live").table(Lawyer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_progress_lawyer_code").table(CaseProgress::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_progress_open_id").table(CaseProgress::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_progress_detail_progress").table(CaseProgressDetail::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_merchant_lat_lng").table(Merchant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lawyer {
    #[sea_orm(iden = "law_lawyer")]
    Table,
    OpenId,
    DeleteTime,
}

#[derive(DeriveIden)]
enum CaseProgress {
    #[sea_orm(iden = "law_case_progress")]
    Table,
    LawyerCode,
    OpenId,
}

#[derive(DeriveIden)]
enum CaseProgressDetail {
    #[sea_orm(iden = "law_case_progress_detail")]
    Table,
    ProgressId,
    CreatedOn,
}

#[derive(DeriveIden)]
enum Merchant { Table, Latitude, Longitude }
