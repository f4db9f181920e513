//! Data access for `law_case_progress` and `law_case_progress_detail`.
//!
//! The free functions take any `ConnectionTrait`, so the same query runs on the
//! pool or inside a transaction. [`SeaOrmCaseProgressRepository`] wires them to
//! a pool and owns the transactional two-write operations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use models::case_progress::{self, Entity as ProgressEntity};
use models::case_progress_detail::{self, Entity as DetailEntity};
use models::unix_now;

use super::domain::{CaseProgressFilter, CaseProgressUpdate, NewCaseProgress, NewDetail};
use crate::errors::ServiceError;
use crate::pagination::OffsetWindow;

#[async_trait]
pub trait CaseProgressRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<case_progress::Model>, ServiceError>;
    async fn list(&self, filter: &CaseProgressFilter, window: OffsetWindow) -> Result<Vec<case_progress::Model>, ServiceError>;
    async fn count(&self, filter: &CaseProgressFilter) -> Result<u64, ServiceError>;
    async fn details(&self, progress_id: i32) -> Result<Vec<case_progress_detail::Model>, ServiceError>;
    async fn latest_detail(&self, progress_id: i32) -> Result<Option<case_progress_detail::Model>, ServiceError>;
    /// Progress row plus its first detail, atomically.
    async fn create_with_first_detail(&self, input: &NewCaseProgress) -> Result<case_progress::Model, ServiceError>;
    /// Stage/status update plus the detail recording it; `false` when no live row matched.
    async fn update_with_detail(&self, id: i32, input: &CaseProgressUpdate) -> Result<bool, ServiceError>;
    /// Soft-deletes the progress and every live detail; `false` when no live row matched.
    async fn delete_cascade(&self, id: i32) -> Result<bool, ServiceError>;
}

fn live() -> Condition {
    Condition::all().add(case_progress::Column::DeletedOn.eq(0))
}

fn filter_condition(filter: &CaseProgressFilter) -> Condition {
    let mut cond = live();
    if let Some(v) = CaseProgressFilter::non_empty(&filter.lawyer_code) {
        cond = cond.add(case_progress::Column::LawyerCode.eq(v));
    }
    if let Some(v) = CaseProgressFilter::non_empty(&filter.open_id) {
        cond = cond.add(case_progress::Column::OpenId.eq(v));
    }
    if let Some(v) = CaseProgressFilter::non_empty(&filter.service_code) {
        cond = cond.add(case_progress::Column::ServiceCode.eq(v));
    }
    cond
}

pub async fn find_progress<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<case_progress::Model>, ServiceError> {
    let found = ProgressEntity::find_by_id(id).filter(live()).one(db).await?;
    Ok(found)
}

/// `window.offset` is a row offset; rows come back in id order so windows never overlap.
pub async fn list_progress<C: ConnectionTrait>(
    db: &C,
    filter: &CaseProgressFilter,
    window: OffsetWindow,
) -> Result<Vec<case_progress::Model>, ServiceError> {
    let rows = ProgressEntity::find()
        .filter(filter_condition(filter))
        .order_by_asc(case_progress::Column::Id)
        .offset(window.offset)
        .limit(window.limit)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn count_progress<C: ConnectionTrait>(db: &C, filter: &CaseProgressFilter) -> Result<u64, ServiceError> {
    Ok(ProgressEntity::find().filter(filter_condition(filter)).count(db).await?)
}

pub async fn insert_progress<C: ConnectionTrait>(db: &C, input: &NewCaseProgress) -> Result<case_progress::Model, ServiceError> {
    let now = unix_now();
    let am = case_progress::ActiveModel {
        service_code: Set(input.service_code.clone()),
        service_version: Set(input.service_version),
        lawyer_code: Set(input.lawyer_code.clone()),
        open_id: Set(input.open_id.clone()),
        case_type: Set(input.case_type),
        current_stage: Set(input.current_stage),
        case_status: Set(input.case_status),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_stage<C: ConnectionTrait>(db: &C, id: i32, stage: i32, status: i32) -> Result<bool, ServiceError> {
    let res = ProgressEntity::update_many()
        .col_expr(case_progress::Column::CurrentStage, Expr::value(stage))
        .col_expr(case_progress::Column::CaseStatus, Expr::value(status))
        .col_expr(case_progress::Column::ModifiedOn, Expr::value(unix_now()))
        .filter(case_progress::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn soft_delete_progress<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let res = ProgressEntity::update_many()
        .col_expr(case_progress::Column::DeletedOn, Expr::value(unix_now()))
        .filter(case_progress::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Returns the number of detail rows marked deleted.
pub async fn soft_delete_details<C: ConnectionTrait>(db: &C, progress_id: i32) -> Result<u64, ServiceError> {
    let res = DetailEntity::update_many()
        .col_expr(case_progress_detail::Column::DeletedOn, Expr::value(unix_now()))
        .filter(case_progress_detail::Column::ProgressId.eq(progress_id))
        .filter(case_progress_detail::Column::DeletedOn.eq(0))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn insert_detail<C: ConnectionTrait>(db: &C, input: &NewDetail) -> Result<case_progress_detail::Model, ServiceError> {
    let now = unix_now();
    let am = case_progress_detail::ActiveModel {
        progress_id: Set(input.progress_id),
        stage: Set(input.stage),
        content: Set(input.content.clone()),
        attachments: Set(input.attachments.clone()),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

fn live_details_of(progress_id: i32) -> sea_orm::Select<DetailEntity> {
    DetailEntity::find()
        .filter(case_progress_detail::Column::ProgressId.eq(progress_id))
        .filter(case_progress_detail::Column::DeletedOn.eq(0))
        .order_by_desc(case_progress_detail::Column::CreatedOn)
        .order_by_desc(case_progress_detail::Column::Id)
}

/// Newest first; same-second entries fall back to id order.
pub async fn list_details<C: ConnectionTrait>(db: &C, progress_id: i32) -> Result<Vec<case_progress_detail::Model>, ServiceError> {
    Ok(live_details_of(progress_id).all(db).await?)
}

pub async fn latest_detail<C: ConnectionTrait>(db: &C, progress_id: i32) -> Result<Option<case_progress_detail::Model>, ServiceError> {
    Ok(live_details_of(progress_id).one(db).await?)
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCaseProgressRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CaseProgressRepository for SeaOrmCaseProgressRepository {
    async fn find(&self, id: i32) -> Result<Option<case_progress::Model>, ServiceError> {
        find_progress(&self.db, id).await
    }

    async fn list(&self, filter: &CaseProgressFilter, window: OffsetWindow) -> Result<Vec<case_progress::Model>, ServiceError> {
        list_progress(&self.db, filter, window).await
    }

    async fn count(&self, filter: &CaseProgressFilter) -> Result<u64, ServiceError> {
        count_progress(&self.db, filter).await
    }

    async fn details(&self, progress_id: i32) -> Result<Vec<case_progress_detail::Model>, ServiceError> {
        list_details(&self.db, progress_id).await
    }

    async fn latest_detail(&self, progress_id: i32) -> Result<Option<case_progress_detail::Model>, ServiceError> {
        latest_detail(&self.db, progress_id).await
    }

    async fn create_with_first_detail(&self, input: &NewCaseProgress) -> Result<case_progress::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let progress = insert_progress(&txn, input).await?;
        let first = NewDetail {
            progress_id: progress.id,
            stage: input.current_stage,
            content: input.content.clone(),
            attachments: input.attachments.clone(),
        };
        insert_detail(&txn, &first).await?;
        txn.commit().await?;
        Ok(progress)
    }

    async fn update_with_detail(&self, id: i32, input: &CaseProgressUpdate) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        if !update_stage(&txn, id, input.current_stage, input.case_status).await? {
            txn.rollback().await?;
            return Ok(false);
        }
        let detail = NewDetail {
            progress_id: id,
            stage: input.current_stage,
            content: input.content.clone(),
            attachments: input.attachments.clone(),
        };
        insert_detail(&txn, &detail).await?;
        txn.commit().await?;
        Ok(true)
    }

    async fn delete_cascade(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        if !soft_delete_progress(&txn, id).await? {
            txn.rollback().await?;
            return Ok(false);
        }
        soft_delete_details(&txn, id).await?;
        txn.commit().await?;
        Ok(true)
    }
}
