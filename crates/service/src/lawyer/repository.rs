//! Data access for `law_lawyer`.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use models::lawyer::{self, AuditStatus, Entity as LawyerEntity, LawyerStatus};
use models::unix_now;

use super::domain::{LawyerListQuery, LawyerLookup, LawyerProfileUpdate, NewLawyer};
use crate::errors::ServiceError;

pub const CODE_EXISTS: &str = "lawyer_code already exists";
pub const PROFILE_EXISTS: &str = "caller already owns a lawyer profile";

#[async_trait]
pub trait LawyerRepository: Send + Sync {
    async fn find_public(&self, lookup: &LawyerLookup) -> Result<Option<lawyer::Model>, ServiceError>;
    async fn find_by_open_id(&self, open_id: &str) -> Result<Option<lawyer::Model>, ServiceError>;
    async fn code_exists(&self, code: &str) -> Result<bool, ServiceError>;
    async fn list_public(&self, query: &LawyerListQuery) -> Result<(Vec<lawyer::Model>, u64), ServiceError>;
    async fn insert(&self, input: &NewLawyer, owner: &str) -> Result<lawyer::Model, ServiceError>;
    async fn update_profile(&self, current: lawyer::Model, input: &LawyerProfileUpdate, editor: &str) -> Result<lawyer::Model, ServiceError>;
    async fn soft_delete(&self, id: i32, deleter: &str) -> Result<bool, ServiceError>;
    async fn increment_view(&self, id: i32) -> Result<(), ServiceError>;
    async fn increment_like(&self, id: i32) -> Result<bool, ServiceError>;
}

fn live() -> Condition {
    Condition::all().add(lawyer::Column::DeleteTime.eq(0))
}

/// Live and active; what anonymous callers may see.
fn public() -> Condition {
    live().add(lawyer::Column::Status.eq(LawyerStatus::Active.code()))
}

fn list_condition(query: &LawyerListQuery) -> Condition {
    let non_empty = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    let mut cond = public();
    if let Some(v) = non_empty(&query.name) {
        cond = cond.add(lawyer::Column::Name.contains(v));
    }
    if let Some(v) = non_empty(&query.legal_field) {
        cond = cond.add(lawyer::Column::LegalField.contains(v));
    }
    cond
}

/// Unique-index violations surface as a conflict, whichever backend raised them.
/// SQLite names the columns and Postgres names the index; both mention `open_id`.
fn map_insert_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("open_id") => {
            ServiceError::Conflict(PROFILE_EXISTS.into())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(CODE_EXISTS.into()),
        _ => ServiceError::Db(e.to_string()),
    }
}

pub async fn find_public_lawyer<C: ConnectionTrait>(db: &C, lookup: &LawyerLookup) -> Result<Option<lawyer::Model>, ServiceError> {
    let select = match lookup {
        LawyerLookup::Id(id) => LawyerEntity::find_by_id(*id),
        LawyerLookup::Code(code) => LawyerEntity::find().filter(lawyer::Column::LawyerCode.eq(code.as_str())),
    };
    Ok(select.filter(public()).one(db).await?)
}

pub async fn find_lawyer_by_open_id<C: ConnectionTrait>(db: &C, open_id: &str) -> Result<Option<lawyer::Model>, ServiceError> {
    Ok(LawyerEntity::find()
        .filter(live())
        .filter(lawyer::Column::OpenId.eq(open_id))
        .order_by_asc(lawyer::Column::Id)
        .one(db)
        .await?)
}

/// Any row, deleted or not, since the unique index covers them all.
pub async fn lawyer_code_exists<C: ConnectionTrait>(db: &C, code: &str) -> Result<bool, ServiceError> {
    Ok(LawyerEntity::find().filter(lawyer::Column::LawyerCode.eq(code)).count(db).await? > 0)
}

pub async fn list_public_lawyers<C: ConnectionTrait>(db: &C, query: &LawyerListQuery) -> Result<(Vec<lawyer::Model>, u64), ServiceError> {
    let (page_idx, per_page) = query.pagination.normalize();
    let select = LawyerEntity::find().filter(list_condition(query)).order_by_asc(lawyer::Column::Id);
    let total = select.clone().count(db).await?;
    let rows = select.paginate(db, per_page).fetch_page(page_idx).await?;
    Ok((rows, total))
}

pub async fn insert_lawyer<C: ConnectionTrait>(db: &C, input: &NewLawyer, owner: &str) -> Result<lawyer::Model, ServiceError> {
    let am = lawyer::ActiveModel {
        lawyer_code: Set(input.lawyer_code.clone()),
        open_id: Set(owner.to_string()),
        name: Set(input.name.clone()),
        avatar: Set(input.avatar.clone()),
        phone: Set(input.phone.clone()),
        email: Set(input.email.clone()),
        law_firm: Set(input.law_firm.clone()),
        license_no: Set(input.license_no.clone()),
        legal_field: Set(input.legal_field.clone()),
        practice_years: Set(input.practice_years),
        introduction: Set(input.introduction.clone()),
        status: Set(LawyerStatus::Active.code()),
        audit_status: Set(AuditStatus::Pending.code()),
        audit_remark: Set(String::new()),
        view_count: Set(0),
        like_count: Set(0),
        version: Set(1),
        create_by: Set(owner.to_string()),
        create_time: Set(unix_now()),
        update_by: Set(String::new()),
        update_time: Set(0),
        delete_by: Set(String::new()),
        delete_time: Set(0),
        ..Default::default()
    };
    am.insert(db).await.map_err(map_insert_err)
}

/// Writes the present profile fields and bumps `version`.
pub async fn update_lawyer_profile<C: ConnectionTrait>(
    db: &C,
    current: lawyer::Model,
    input: &LawyerProfileUpdate,
    editor: &str,
) -> Result<lawyer::Model, ServiceError> {
    let version = current.version;
    let mut am: lawyer::ActiveModel = current.into();
    if let Some(v) = &input.name { am.name = Set(v.clone()); }
    if let Some(v) = &input.avatar { am.avatar = Set(v.clone()); }
    if let Some(v) = &input.phone { am.phone = Set(v.clone()); }
    if let Some(v) = &input.email { am.email = Set(v.clone()); }
    if let Some(v) = &input.law_firm { am.law_firm = Set(v.clone()); }
    if let Some(v) = &input.license_no { am.license_no = Set(v.clone()); }
    if let Some(v) = &input.legal_field { am.legal_field = Set(v.clone()); }
    if let Some(v) = input.practice_years { am.practice_years = Set(v); }
    if let Some(v) = &input.introduction { am.introduction = Set(v.clone()); }
    am.update_by = Set(editor.to_string());
    am.update_time = Set(unix_now());
    am.version = Set(version + 1);
    Ok(am.update(db).await?)
}

pub async fn soft_delete_lawyer<C: ConnectionTrait>(db: &C, id: i32, deleter: &str) -> Result<bool, ServiceError> {
    let res = LawyerEntity::update_many()
        .col_expr(lawyer::Column::DeleteTime, Expr::value(unix_now()))
        .col_expr(lawyer::Column::DeleteBy, Expr::value(deleter))
        .filter(lawyer::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

async fn increment<C: ConnectionTrait>(db: &C, id: i32, col: lawyer::Column) -> Result<bool, ServiceError> {
    let res = LawyerEntity::update_many()
        .col_expr(col, Expr::col(col).add(1))
        .filter(lawyer::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn increment_view_count<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    increment(db, id, lawyer::Column::ViewCount).await
}

pub async fn increment_like_count<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    increment(db, id, lawyer::Column::LikeCount).await
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmLawyerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl LawyerRepository for SeaOrmLawyerRepository {
    async fn find_public(&self, lookup: &LawyerLookup) -> Result<Option<lawyer::Model>, ServiceError> {
        find_public_lawyer(&self.db, lookup).await
    }

    async fn find_by_open_id(&self, open_id: &str) -> Result<Option<lawyer::Model>, ServiceError> {
        find_lawyer_by_open_id(&self.db, open_id).await
    }

    async fn code_exists(&self, code: &str) -> Result<bool, ServiceError> {
        lawyer_code_exists(&self.db, code).await
    }

    async fn list_public(&self, query: &LawyerListQuery) -> Result<(Vec<lawyer::Model>, u64), ServiceError> {
        list_public_lawyers(&self.db, query).await
    }

    async fn insert(&self, input: &NewLawyer, owner: &str) -> Result<lawyer::Model, ServiceError> {
        insert_lawyer(&self.db, input, owner).await
    }

    async fn update_profile(&self, current: lawyer::Model, input: &LawyerProfileUpdate, editor: &str) -> Result<lawyer::Model, ServiceError> {
        update_lawyer_profile(&self.db, current, input, editor).await
    }

    async fn soft_delete(&self, id: i32, deleter: &str) -> Result<bool, ServiceError> {
        soft_delete_lawyer(&self.db, id, deleter).await
    }

    async fn increment_view(&self, id: i32) -> Result<(), ServiceError> {
        increment_view_count(&self.db, id).await.map(|_| ())
    }

    async fn increment_like(&self, id: i32) -> Result<bool, ServiceError> {
        increment_like_count(&self.db, id).await
    }
}
