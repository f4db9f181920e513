use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use models::{case_progress, case_progress_detail};
use service::case_progress::domain::{CaseProgressFilter, CaseProgressUpdate, CaseProgressView, NewCaseProgress};
use service::pagination::Page;

use crate::errors::{ApiError, Resource};
use crate::response::{ok, Envelope, ErrCode, IdResponse};
use crate::state::AppState;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ProgressListParams {
    pub lawyer_code: Option<String>,
    pub open_id: Option<String>,
    pub service_code: Option<String>,
    /// Row offset, not a page index.
    pub page: Option<u64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateProgressRequest {
    pub service_code: String,
    pub service_version: i32,
    pub lawyer_code: String,
    pub open_id: String,
    pub case_type: i32,
    pub current_stage: i32,
    pub case_status: i32,
    pub content: String,
    pub attachments: String,
}

impl From<CreateProgressRequest> for NewCaseProgress {
    fn from(r: CreateProgressRequest) -> Self {
        NewCaseProgress {
            service_code: r.service_code,
            service_version: r.service_version,
            lawyer_code: r.lawyer_code,
            open_id: r.open_id,
            case_type: r.case_type,
            current_stage: r.current_stage,
            case_status: r.case_status,
            content: r.content,
            attachments: r.attachments,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProgressRequest {
    pub current_stage: i32,
    pub case_status: i32,
    pub content: String,
    pub attachments: String,
}

impl From<UpdateProgressRequest> for CaseProgressUpdate {
    fn from(r: UpdateProgressRequest) -> Self {
        CaseProgressUpdate {
            current_stage: r.current_stage,
            case_status: r.case_status,
            content: r.content,
            attachments: r.attachments,
        }
    }
}

#[utoipa::path(get, path = "/api/v1/case-progress", tag = "case-progress", params(ProgressListParams), responses((status = 200, description = "Progress window and total")))]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ProgressListParams>, QueryRejection>,
) -> ApiResult<Page<case_progress::Model>> {
    let Query(p) = params?;
    let filter = CaseProgressFilter { lawyer_code: p.lawyer_code, open_id: p.open_id, service_code: p.service_code };
    let page = state
        .progress_svc
        .list(&filter, p.page.unwrap_or(0))
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorGetProgressesFail, e))?;
    Ok(ok(page))
}

#[utoipa::path(get, path = "/api/v1/case-progress/{id}", tag = "case-progress", params(("id" = i32, Path,)), responses((status = 200, description = "Progress with history"), (status = 404, description = "Not found")))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<CaseProgressView> {
    let Path(id) = id?;
    let view = state
        .progress_svc
        .get(id)
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorGetProgressFail, e))?
        .ok_or_else(|| ApiError::not_found(Resource::CaseProgress))?;
    Ok(ok(view))
}

#[utoipa::path(post, path = "/api/v1/case-progress", tag = "case-progress", request_body = CreateProgressRequest, responses((status = 200, description = "Created", body = IdResponse), (status = 400, description = "Invalid params")))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProgressRequest>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let Json(req) = body?;
    let created = state
        .progress_svc
        .create(req.into())
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorAddProgressFail, e))?;
    info!(progress_id = created.id, "case progress created");
    Ok(ok(IdResponse { id: created.id }))
}

#[utoipa::path(put, path = "/api/v1/case-progress/{id}", tag = "case-progress", params(("id" = i32, Path,)), request_body = UpdateProgressRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    let Json(req) = body?;
    state
        .progress_svc
        .update(id, req.into())
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorUpdateProgressFail, e))?;
    Ok(ok(()))
}

#[utoipa::path(delete, path = "/api/v1/case-progress/{id}", tag = "case-progress", params(("id" = i32, Path,)), responses((status = 200, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state
        .progress_svc
        .delete(id)
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorDeleteProgressFail, e))?;
    Ok(ok(()))
}

#[utoipa::path(get, path = "/api/v1/case-progress/{id}/latest", tag = "case-progress", params(("id" = i32, Path,)), responses((status = 200, description = "Most recent detail"), (status = 404, description = "No detail")))]
pub async fn latest(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<case_progress_detail::Model> {
    let Path(id) = id?;
    let detail = state
        .progress_svc
        .latest_detail(id)
        .await
        .map_err(|e| ApiError::service(Resource::CaseProgress, ErrCode::ErrorGetProgressFail, e))?
        .ok_or_else(|| ApiError::new(axum::http::StatusCode::NOT_FOUND, ErrCode::ErrorNotExistProgressDetail))?;
    Ok(ok(detail))
}
