use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use models::merchant;
use service::merchant::domain::{MerchantFilter, MerchantUpdate, NearbyMerchant, NearbyQuery, NewMerchant};
use service::pagination::Page;

use crate::errors::{ApiError, Resource};
use crate::response::{ok, Envelope, ErrCode};
use crate::state::AppState;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct MerchantListParams {
    pub name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub status: Option<i32>,
    pub admin_id: Option<i32>,
    /// Row offset, not a page index.
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    pub longitude: f64,
    pub latitude: f64,
    /// Radius in metres.
    pub distance: f64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateMerchantRequest {
    pub name: String,
    pub logo: String,
    pub cover_image: String,
    pub business_license: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub address: String,
    pub longitude: f64,
    pub latitude: f64,
    pub rating: Option<f64>,
    pub month_sales: i32,
    pub business_hours: String,
    pub table_count: i32,
    pub admin_id: i32,
    pub status: Option<i32>,
    pub notice: String,
}

impl From<CreateMerchantRequest> for NewMerchant {
    fn from(r: CreateMerchantRequest) -> Self {
        NewMerchant {
            name: r.name,
            logo: r.logo,
            cover_image: r.cover_image,
            business_license: r.business_license,
            contact_name: r.contact_name,
            contact_phone: r.contact_phone,
            province: r.province,
            city: r.city,
            district: r.district,
            address: r.address,
            longitude: r.longitude,
            latitude: r.latitude,
            rating: r.rating,
            month_sales: r.month_sales,
            business_hours: r.business_hours,
            table_count: r.table_count,
            admin_id: r.admin_id,
            status: r.status,
            notice: r.notice,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateMerchantRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub business_license: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub rating: Option<f64>,
    pub month_sales: Option<i32>,
    pub business_hours: Option<String>,
    pub table_count: Option<i32>,
    pub status: Option<i32>,
    pub notice: Option<String>,
}

impl From<UpdateMerchantRequest> for MerchantUpdate {
    fn from(r: UpdateMerchantRequest) -> Self {
        MerchantUpdate {
            name: r.name,
            logo: r.logo,
            cover_image: r.cover_image,
            business_license: r.business_license,
            contact_name: r.contact_name,
            contact_phone: r.contact_phone,
            province: r.province,
            city: r.city,
            district: r.district,
            address: r.address,
            longitude: r.longitude,
            latitude: r.latitude,
            rating: r.rating,
            month_sales: r.month_sales,
            business_hours: r.business_hours,
            table_count: r.table_count,
            status: r.status,
            notice: r.notice,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    pub status: i32,
}

#[utoipa::path(get, path = "/api/v1/merchants", tag = "merchants", params(MerchantListParams), responses((status = 200, description = "Merchant window and total")))]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<MerchantListParams>, QueryRejection>,
) -> ApiResult<Page<merchant::Model>> {
    let Query(p) = params?;
    let filter = MerchantFilter { name: p.name, city: p.city, district: p.district, status: p.status, admin_id: p.admin_id };
    let page = state
        .merchant_svc
        .list(&filter, p.page.unwrap_or(0), p.page_size)
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorGetMerchantsFail, e))?;
    Ok(ok(page))
}

#[utoipa::path(get, path = "/api/v1/merchants/nearby", tag = "merchants", params(NearbyParams), responses((status = 200, description = "Merchants within the radius, nearest first")))]
pub async fn nearby(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> ApiResult<Vec<NearbyMerchant>> {
    let Query(p) = params?;
    let query = NearbyQuery { longitude: p.longitude, latitude: p.latitude, distance: p.distance };
    let hits = state
        .merchant_svc
        .nearby(query)
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorGetMerchantsFail, e))?;
    Ok(ok(hits))
}

#[utoipa::path(get, path = "/api/v1/merchants/{id}", tag = "merchants", params(("id" = i32, Path,)), responses((status = 200, description = "Merchant"), (status = 404, description = "Not found")))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<merchant::Model> {
    let Path(id) = id?;
    let m = state
        .merchant_svc
        .get(id)
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorGetMerchantFail, e))?
        .ok_or_else(|| ApiError::not_found(Resource::Merchant))?;
    Ok(ok(m))
}

#[utoipa::path(post, path = "/api/v1/merchants", tag = "merchants", request_body = CreateMerchantRequest, responses((status = 200, description = "Created merchant"), (status = 400, description = "Invalid params")))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateMerchantRequest>, JsonRejection>,
) -> ApiResult<merchant::Model> {
    let Json(req) = body?;
    let created = state
        .merchant_svc
        .create(req.into())
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorAddMerchantFail, e))?;
    info!(merchant_id = created.id, "merchant created");
    Ok(ok(created))
}

#[utoipa::path(put, path = "/api/v1/merchants/{id}", tag = "merchants", params(("id" = i32, Path,)), request_body = UpdateMerchantRequest, responses((status = 200, description = "Updated merchant"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateMerchantRequest>, JsonRejection>,
) -> ApiResult<merchant::Model> {
    let Path(id) = id?;
    let Json(req) = body?;
    let updated = state
        .merchant_svc
        .update(id, req.into())
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorEditMerchantFail, e))?;
    Ok(ok(updated))
}

#[utoipa::path(put, path = "/api/v1/merchants/{id}/status", tag = "merchants", params(("id" = i32, Path,)), request_body = StatusRequest, responses((status = 200, description = "Status changed"), (status = 404, description = "Not found")))]
pub async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<StatusRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    let Json(req) = body?;
    state
        .merchant_svc
        .update_status(id, req.status)
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorUpdateMerchantStatusFail, e))?;
    Ok(ok(()))
}

#[utoipa::path(delete, path = "/api/v1/merchants/{id}", tag = "merchants", params(("id" = i32, Path,)), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state
        .merchant_svc
        .delete(id)
        .await
        .map_err(|e| ApiError::service(Resource::Merchant, ErrCode::ErrorDeleteMerchantFail, e))?;
    Ok(ok(()))
}
