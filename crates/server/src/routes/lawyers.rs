use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use models::lawyer::{self, PublicLawyer};
use service::lawyer::domain::{LawyerListPage, LawyerListQuery, LawyerLookup, LawyerProfileUpdate, NewLawyer};
use service::pagination::Pagination;

use crate::auth::CurrentUser;
use crate::errors::{ApiError, Resource};
use crate::response::{ok, Envelope, ErrCode, IdResponse};
use crate::state::AppState;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// `id` wins over `code` when both are given.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct LawyerLookupParams {
    pub id: Option<String>,
    pub code: Option<String>,
}

impl LawyerLookupParams {
    fn lookup(self) -> Result<LawyerLookup, ApiError> {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if let Some(id) = non_empty(self.id) {
            return id
                .parse::<i32>()
                .map(LawyerLookup::Id)
                .map_err(|_| ApiError::invalid_params(format!("id must be an integer, got {id:?}")));
        }
        match non_empty(self.code) {
            Some(code) => Ok(LawyerLookup::Code(code)),
            None => Err(ApiError::invalid_params("id or code is required")),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct LikeParams {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct LawyerListParams {
    pub name: Option<String>,
    pub legal_field: Option<String>,
    /// 1-based.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<LawyerListParams> for LawyerListQuery {
    fn from(p: LawyerListParams) -> Self {
        let defaults = Pagination::default();
        LawyerListQuery {
            name: p.name,
            legal_field: p.legal_field,
            pagination: Pagination {
                page: p.page.unwrap_or(defaults.page),
                per_page: p.page_size.unwrap_or(defaults.per_page),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateLawyerRequest {
    pub lawyer_code: String,
    pub name: String,
    pub phone: String,
    pub avatar: String,
    pub email: String,
    pub law_firm: String,
    pub license_no: String,
    pub legal_field: String,
    pub practice_years: i32,
    pub introduction: String,
}

impl From<CreateLawyerRequest> for NewLawyer {
    fn from(r: CreateLawyerRequest) -> Self {
        NewLawyer {
            lawyer_code: r.lawyer_code,
            name: r.name,
            phone: r.phone,
            avatar: r.avatar,
            email: r.email,
            law_firm: r.law_firm,
            license_no: r.license_no,
            legal_field: r.legal_field,
            practice_years: r.practice_years,
            introduction: r.introduction,
        }
    }
}

/// Profile fields only. Unknown keys such as `status` or `lawyer_code` are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLawyerRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub law_firm: Option<String>,
    pub license_no: Option<String>,
    pub legal_field: Option<String>,
    pub practice_years: Option<i32>,
    pub introduction: Option<String>,
}

impl From<UpdateLawyerRequest> for LawyerProfileUpdate {
    fn from(r: UpdateLawyerRequest) -> Self {
        LawyerProfileUpdate {
            name: r.name,
            avatar: r.avatar,
            phone: r.phone,
            email: r.email,
            law_firm: r.law_firm,
            license_no: r.license_no,
            legal_field: r.legal_field,
            practice_years: r.practice_years,
            introduction: r.introduction,
        }
    }
}

#[utoipa::path(get, path = "/api/v1/lawyer", tag = "lawyers", params(LawyerLookupParams), responses((status = 200, description = "Public profile"), (status = 400, description = "Invalid params"), (status = 404, description = "Not found")))]
pub async fn get_public(
    State(state): State<AppState>,
    params: Result<Query<LawyerLookupParams>, QueryRejection>,
) -> ApiResult<PublicLawyer> {
    let Query(p) = params?;
    let lookup = p.lookup()?;
    let found = state
        .lawyer_svc
        .get_public(&lookup)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorGetLawyerFail, e))?
        .ok_or_else(|| ApiError::not_found(Resource::Lawyer))?;
    // 浏览量异步累加，不阻塞响应
    drop(state.lawyer_svc.spawn_view_increment(found.id));
    Ok(ok(found))
}

#[utoipa::path(get, path = "/api/v1/lawyers", tag = "lawyers", params(LawyerListParams), responses((status = 200, description = "Directory page")))]
pub async fn list_public(
    State(state): State<AppState>,
    params: Result<Query<LawyerListParams>, QueryRejection>,
) -> ApiResult<LawyerListPage> {
    let Query(p) = params?;
    let page = state
        .lawyer_svc
        .list_public(&p.into())
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorGetLawyersFail, e))?;
    Ok(ok(page))
}

#[utoipa::path(post, path = "/api/v1/lawyer/like", tag = "lawyers", params(LikeParams), responses((status = 200, description = "Liked"), (status = 404, description = "Not found")))]
pub async fn like(
    State(state): State<AppState>,
    params: Result<Query<LikeParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(p) = params?;
    let LawyerLookup::Id(id) = LawyerLookupParams { id: p.id, code: None }.lookup()? else {
        return Err(ApiError::invalid_params("id is required"));
    };
    state
        .lawyer_svc
        .like(id)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorUpdateLawyerFail, e))?;
    Ok(ok(()))
}

#[utoipa::path(get, path = "/api/v1/lawyer/self", tag = "lawyers", responses((status = 200, description = "Caller's own profile"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not found")))]
pub async fn get_own(State(state): State<AppState>, user: CurrentUser) -> ApiResult<lawyer::Model> {
    let own = state
        .lawyer_svc
        .get_own(&user.open_id)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorGetLawyerFail, e))?
        .ok_or_else(|| ApiError::not_found(Resource::Lawyer))?;
    Ok(ok(own))
}

#[utoipa::path(post, path = "/api/v1/lawyer", tag = "lawyers", request_body = CreateLawyerRequest, responses((status = 200, description = "Created", body = IdResponse), (status = 400, description = "Invalid params or lawyer exists")))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<CreateLawyerRequest>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let Json(req) = body?;
    let created = state
        .lawyer_svc
        .create(req.into(), &user.open_id)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorAddLawyerFail, e))?;
    info!(lawyer_id = created.id, open_id = %user.open_id, "lawyer profile created");
    Ok(ok(IdResponse { id: created.id }))
}

#[utoipa::path(put, path = "/api/v1/lawyer", tag = "lawyers", request_body = UpdateLawyerRequest, responses((status = 200, description = "Updated profile"), (status = 404, description = "Not found")))]
pub async fn update_own(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<UpdateLawyerRequest>, JsonRejection>,
) -> ApiResult<lawyer::Model> {
    let Json(req) = body?;
    let updated = state
        .lawyer_svc
        .update_own(req.into(), &user.open_id)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorEditLawyerFail, e))?;
    Ok(ok(updated))
}

#[utoipa::path(delete, path = "/api/v1/lawyer", tag = "lawyers", responses((status = 200, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete_own(State(state): State<AppState>, user: CurrentUser) -> ApiResult<()> {
    state
        .lawyer_svc
        .delete_own(&user.open_id)
        .await
        .map_err(|e| ApiError::service(Resource::Lawyer, ErrCode::ErrorDeleteLawyerFail, e))?;
    Ok(ok(()))
}
