use crate::db::connect_in_memory;
use crate::tests::schema_tests::progress_row;
use crate::{case_progress, case_progress_detail, unix_now};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn detail_row(progress_id: i32, stage: i32, content: &str) -> case_progress_detail::ActiveModel {
    let now = unix_now();
    case_progress_detail::ActiveModel {
        progress_id: Set(progress_id),
        stage: Set(stage),
        content: Set(content.to_string()),
        attachments: Set(String::new()),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_transaction_commit_keeps_both_rows() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let p = progress_row("LAW-1", "c-1").insert(&txn).await?;
    detail_row(p.id, 1, "立案").insert(&txn).await?;
    txn.commit().await?;

    let details = p.find_related(case_progress_detail::Entity).all(&db).await?;
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].content, "立案");
    Ok(())
}

#[tokio::test]
async fn test_transaction_rollback_discards_both_rows() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let p = progress_row("LAW-1", "c-1").insert(&txn).await?;
    detail_row(p.id, 1, "立案").insert(&txn).await?;
    txn.rollback().await?;

    assert_eq!(case_progress::Entity::find().count(&db).await?, 0);
    assert_eq!(case_progress_detail::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_detail_requires_existing_progress() -> Result<()> {
    let db = setup_test_db().await?;

    let orphan = detail_row(4242, 1, "无主记录").insert(&db).await;
    assert!(orphan.is_err(), "foreign key must reject a detail without a progress");

    let p = progress_row("LAW-2", "c-2").insert(&db).await?;
    detail_row(p.id, 1, "a").insert(&db).await?;
    detail_row(p.id, 2, "b").insert(&db).await?;
    let count = case_progress_detail::Entity::find()
        .filter(case_progress_detail::Column::ProgressId.eq(p.id))
        .count(&db)
        .await?;
    assert_eq!(count, 2);
    Ok(())
}
