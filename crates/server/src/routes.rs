pub mod case_progress;
pub mod lawyers;
pub mod merchants;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::auth::require_bearer_token;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Headroom for multipart framing on top of the largest allowed file.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public reads, token-protected writes and static uploads
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let upload_limit = usize::try_from(service::upload::max_upload_size()).unwrap_or(usize::MAX).saturating_add(MULTIPART_OVERHEAD);

    // Public routes (health, docs, uploaded files, directory reads)
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service(state.upload.url_prefix.trim_end_matches('/'), ServeDir::new(&state.upload.dir))
        .route("/api/v1/merchants", get(merchants::list))
        .route("/api/v1/merchants/nearby", get(merchants::nearby))
        .route("/api/v1/merchants/:id", get(merchants::get))
        .route("/api/v1/lawyer", get(lawyers::get_public))
        .route("/api/v1/lawyers", get(lawyers::list_public))
        .route("/api/v1/lawyer/like", post(lawyers::like));

    // Protected routes: Bearer token or auth_token cookie
    let protected = Router::new()
        .route("/api/v1/case-progress", get(case_progress::list).post(case_progress::create))
        .route(
            "/api/v1/case-progress/:id",
            get(case_progress::get).put(case_progress::update).delete(case_progress::delete),
        )
        .route("/api/v1/case-progress/:id/latest", get(case_progress::latest))
        .route("/api/v1/merchants", post(merchants::create))
        .route("/api/v1/merchants/:id", put(merchants::update).delete(merchants::delete))
        .route("/api/v1/merchants/:id/status", put(merchants::update_status))
        .route("/api/v1/lawyer/self", get(lawyers::get_own))
        .route("/api/v1/lawyer", post(lawyers::create).put(lawyers::update_own).delete(lawyers::delete_own))
        .route(
            "/api/v1/upload/:type",
            post(upload::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer_token));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
