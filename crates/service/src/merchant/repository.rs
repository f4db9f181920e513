//! Data access for `merchant`.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use models::merchant::{self, Entity as MerchantEntity, MerchantStatus};
use models::unix_now;

use super::domain::{MerchantFilter, MerchantUpdate, NearbyMerchant, NearbyQuery, NewMerchant};
use crate::errors::ServiceError;
use crate::geo::{haversine_km, within_km, BoundingBox};
use crate::pagination::OffsetWindow;

#[async_trait]
pub trait MerchantRepository: Send + Sync {
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<merchant::Model>, ServiceError>;
    async fn list(&self, filter: &MerchantFilter, window: OffsetWindow) -> Result<Vec<merchant::Model>, ServiceError>;
    async fn count(&self, filter: &MerchantFilter) -> Result<u64, ServiceError>;
    async fn insert(&self, input: &NewMerchant) -> Result<merchant::Model, ServiceError>;
    async fn update(&self, id: i32, input: &MerchantUpdate) -> Result<Option<merchant::Model>, ServiceError>;
    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn update_status(&self, id: i32, status: i32) -> Result<bool, ServiceError>;
    async fn nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyMerchant>, ServiceError>;
}

fn live() -> Condition {
    Condition::all().add(merchant::Column::DeletedOn.eq(0))
}

fn filter_condition(filter: &MerchantFilter) -> Condition {
    let non_empty = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    let mut cond = live();
    if let Some(v) = non_empty(&filter.name) {
        cond = cond.add(merchant::Column::Name.eq(v));
    }
    if let Some(v) = non_empty(&filter.city) {
        cond = cond.add(merchant::Column::City.eq(v));
    }
    if let Some(v) = non_empty(&filter.district) {
        cond = cond.add(merchant::Column::District.eq(v));
    }
    if let Some(v) = filter.status {
        cond = cond.add(merchant::Column::Status.eq(v));
    }
    if let Some(v) = filter.admin_id {
        cond = cond.add(merchant::Column::AdminId.eq(v));
    }
    cond
}

pub async fn exists_merchant<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let n = MerchantEntity::find_by_id(id).filter(live()).count(db).await?;
    Ok(n > 0)
}

pub async fn find_merchant<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<merchant::Model>, ServiceError> {
    Ok(MerchantEntity::find_by_id(id).filter(live()).one(db).await?)
}

pub async fn list_merchants<C: ConnectionTrait>(
    db: &C,
    filter: &MerchantFilter,
    window: OffsetWindow,
) -> Result<Vec<merchant::Model>, ServiceError> {
    let rows = MerchantEntity::find()
        .filter(filter_condition(filter))
        .order_by_asc(merchant::Column::Id)
        .offset(window.offset)
        .limit(window.limit)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn count_merchants<C: ConnectionTrait>(db: &C, filter: &MerchantFilter) -> Result<u64, ServiceError> {
    Ok(MerchantEntity::find().filter(filter_condition(filter)).count(db).await?)
}

pub async fn insert_merchant<C: ConnectionTrait>(db: &C, input: &NewMerchant) -> Result<merchant::Model, ServiceError> {
    let now = unix_now();
    let am = merchant::ActiveModel {
        name: Set(input.name.clone()),
        logo: Set(input.logo.clone()),
        cover_image: Set(input.cover_image.clone()),
        business_license: Set(input.business_license.clone()),
        contact_name: Set(input.contact_name.clone()),
        contact_phone: Set(input.contact_phone.clone()),
        province: Set(input.province.clone()),
        city: Set(input.city.clone()),
        district: Set(input.district.clone()),
        address: Set(input.address.clone()),
        longitude: Set(input.longitude),
        latitude: Set(input.latitude),
        rating: Set(input.rating.unwrap_or(merchant::DEFAULT_RATING)),
        month_sales: Set(input.month_sales),
        business_hours: Set(input.business_hours.clone()),
        table_count: Set(input.table_count),
        admin_id: Set(input.admin_id),
        status: Set(input.status.unwrap_or(MerchantStatus::default().code())),
        notice: Set(input.notice.clone()),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Applies the present fields to a live row; `None` when there is no such row.
pub async fn update_merchant<C: ConnectionTrait>(
    db: &C,
    id: i32,
    input: &MerchantUpdate,
) -> Result<Option<merchant::Model>, ServiceError> {
    let Some(existing) = find_merchant(db, id).await? else { return Ok(None) };
    let mut am: merchant::ActiveModel = existing.into();
    if let Some(v) = &input.name { am.name = Set(v.clone()); }
    if let Some(v) = &input.logo { am.logo = Set(v.clone()); }
    if let Some(v) = &input.cover_image { am.cover_image = Set(v.clone()); }
    if let Some(v) = &input.business_license { am.business_license = Set(v.clone()); }
    if let Some(v) = &input.contact_name { am.contact_name = Set(v.clone()); }
    if let Some(v) = &input.contact_phone { am.contact_phone = Set(v.clone()); }
    if let Some(v) = &input.province { am.province = Set(v.clone()); }
    if let Some(v) = &input.city { am.city = Set(v.clone()); }
    if let Some(v) = &input.district { am.district = Set(v.clone()); }
    if let Some(v) = &input.address { am.address = Set(v.clone()); }
    if let Some(v) = input.longitude { am.longitude = Set(v); }
    if let Some(v) = input.latitude { am.latitude = Set(v); }
    if let Some(v) = input.rating { am.rating = Set(v); }
    if let Some(v) = input.month_sales { am.month_sales = Set(v); }
    if let Some(v) = &input.business_hours { am.business_hours = Set(v.clone()); }
    if let Some(v) = input.table_count { am.table_count = Set(v); }
    if let Some(v) = input.status { am.status = Set(v); }
    if let Some(v) = &input.notice { am.notice = Set(v.clone()); }
    am.modified_on = Set(unix_now());
    Ok(Some(am.update(db).await?))
}

pub async fn soft_delete_merchant<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let res = MerchantEntity::update_many()
        .col_expr(merchant::Column::DeletedOn, Expr::value(unix_now()))
        .filter(merchant::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn update_merchant_status<C: ConnectionTrait>(db: &C, id: i32, status: i32) -> Result<bool, ServiceError> {
    let res = MerchantEntity::update_many()
        .col_expr(merchant::Column::Status, Expr::value(status))
        .col_expr(merchant::Column::ModifiedOn, Expr::value(unix_now()))
        .filter(merchant::Column::Id.eq(id))
        .filter(live())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Live merchants within `query.distance` metres, nearest first.
///
/// A bounding box narrows the rows in SQL; the haversine check runs here so the
/// same query works on every backend.
pub async fn nearby_merchants<C: ConnectionTrait>(db: &C, query: NearbyQuery) -> Result<Vec<NearbyMerchant>, ServiceError> {
    let radius_km = query.distance / 1000.0;
    let bbox = BoundingBox::around(query.longitude, query.latitude, radius_km);

    let mut cond = live()
        .add(merchant::Column::Latitude.gte(bbox.min_lat))
        .add(merchant::Column::Latitude.lte(bbox.max_lat));
    if let Some((lo, hi)) = bbox.lon {
        cond = cond.add(merchant::Column::Longitude.gte(lo)).add(merchant::Column::Longitude.lte(hi));
    }
    let candidates = MerchantEntity::find().filter(cond).all(db).await?;

    let mut hits: Vec<NearbyMerchant> = candidates
        .into_iter()
        .filter(|m| within_km(query.longitude, query.latitude, m.longitude, m.latitude, radius_km))
        .map(|m| {
            let distance = haversine_km(query.longitude, query.latitude, m.longitude, m.latitude) * 1000.0;
            NearbyMerchant { merchant: m, distance }
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.merchant.id.cmp(&b.merchant.id)));
    Ok(hits)
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMerchantRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl MerchantRepository for SeaOrmMerchantRepository {
    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        exists_merchant(&self.db, id).await
    }

    async fn find(&self, id: i32) -> Result<Option<merchant::Model>, ServiceError> {
        find_merchant(&self.db, id).await
    }

    async fn list(&self, filter: &MerchantFilter, window: OffsetWindow) -> Result<Vec<merchant::Model>, ServiceError> {
        list_merchants(&self.db, filter, window).await
    }

    async fn count(&self, filter: &MerchantFilter) -> Result<u64, ServiceError> {
        count_merchants(&self.db, filter).await
    }

    async fn insert(&self, input: &NewMerchant) -> Result<merchant::Model, ServiceError> {
        insert_merchant(&self.db, input).await
    }

    async fn update(&self, id: i32, input: &MerchantUpdate) -> Result<Option<merchant::Model>, ServiceError> {
        update_merchant(&self.db, id, input).await
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        soft_delete_merchant(&self.db, id).await
    }

    async fn update_status(&self, id: i32, status: i32) -> Result<bool, ServiceError> {
        update_merchant_status(&self.db, id, status).await
    }

    async fn nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyMerchant>, ServiceError> {
        nearby_merchants(&self.db, query).await
    }
}
