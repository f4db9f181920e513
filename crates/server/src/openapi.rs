use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::response::IdResponse;
use crate::routes::{case_progress, lawyers, merchants, upload};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Shape shared by every `/api/v1` response.
#[derive(ToSchema)]
pub struct EnvelopeDoc {
    pub code: u32,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct PublicLawyerDoc {
    pub id: i32,
    pub lawyer_code: String,
    pub name: String,
    pub avatar: String,
    pub law_firm: String,
    pub legal_field: String,
    pub practice_years: i32,
    pub introduction: String,
    pub view_count: i64,
    pub like_count: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        case_progress::list,
        case_progress::get,
        case_progress::create,
        case_progress::update,
        case_progress::delete,
        case_progress::latest,
        merchants::list,
        merchants::nearby,
        merchants::get,
        merchants::create,
        merchants::update,
        merchants::update_status,
        merchants::delete,
        lawyers::get_public,
        lawyers::list_public,
        lawyers::like,
        lawyers::get_own,
        lawyers::create,
        lawyers::update_own,
        lawyers::delete_own,
        upload::upload,
    ),
    components(
        schemas(
            HealthResponse,
            EnvelopeDoc,
            PublicLawyerDoc,
            IdResponse,
            case_progress::CreateProgressRequest,
            case_progress::UpdateProgressRequest,
            merchants::CreateMerchantRequest,
            merchants::UpdateMerchantRequest,
            merchants::StatusRequest,
            lawyers::CreateLawyerRequest,
            lawyers::UpdateLawyerRequest,
            upload::UploadResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "case-progress"),
        (name = "merchants"),
        (name = "lawyers"),
        (name = "upload")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/case-progress/{id}/latest",
            "/api/v1/merchants/nearby",
            "/api/v1/lawyers",
            "/api/v1/upload/{type}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
