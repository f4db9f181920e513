use std::path::PathBuf;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::PathRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use service::upload::{self, UploadError};

use crate::errors::ApiError;
use crate::response::{ok, Envelope, ErrCode};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Stored file name, `{uuid}{ext}`.
    pub name: String,
    pub url: String,
    pub size: u64,
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        let code = match &e {
            UploadError::UnknownType(_) => ErrCode::ErrorUploadInvalidType,
            UploadError::TooLarge { .. } => ErrCode::ErrorUploadFileTooLarge,
            UploadError::BadExtension(_) => ErrCode::ErrorUploadCheckFileFormat,
            UploadError::UnreadableImage(_)
            | UploadError::TooWide { .. }
            | UploadError::TooTall { .. }
            | UploadError::TooNarrow { .. }
            | UploadError::TooShort { .. } => ErrCode::ErrorUploadCheckFileFail,
        };
        ApiError::new(StatusCode::BAD_REQUEST, code).with_detail(e.to_string())
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(StatusCode::BAD_REQUEST, ErrCode::ErrorUploadFileTooLarge);
    }
    warn!(error = %e.body_text(), "malformed multipart body");
    ApiError::invalid_params(e.body_text())
}

/// Drains the form until the `file` field; returns its original name and bytes.
async fn read_file_field(mut form: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = form.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(ApiError::invalid_params("multipart field \"file\" is required"))
}

fn public_url(prefix: &str, upload_type: &str, name: &str) -> String {
    format!("{}/{}/{}", prefix.trim_end_matches('/'), upload_type, name)
}

#[utoipa::path(post, path = "/api/v1/upload/{type}", tag = "upload", params(("type" = String, Path, description = "avatar | logo | cover | license | attachment")), responses((status = 200, description = "Stored", body = UploadResponse), (status = 400, description = "Rejected file")))]
pub async fn upload(
    State(state): State<AppState>,
    upload_type: Result<Path<String>, PathRejection>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Json<Envelope<UploadResponse>>, ApiError> {
    let Path(upload_type) = upload_type?;
    if !upload::check_upload_type(&upload_type) {
        return Err(UploadError::UnknownType(upload_type).into());
    }
    let form = form.map_err(|e| ApiError::invalid_params(e.body_text()))?;
    let (filename, bytes) = read_file_field(form).await?;
    let ext = upload::validate_upload(&bytes, &filename, &upload_type)?;

    let name = format!("{}{}", Uuid::new_v4(), ext);
    let dest: PathBuf = [state.upload.dir.as_str(), upload_type.as_str(), name.as_str()].iter().collect();
    if let Err(e) = tokio::fs::write(&dest, &bytes).await {
        error!(path = %dest.display(), error = %e, "failed to write upload");
        return Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, ErrCode::ErrorUploadSaveFileFail));
    }

    info!(upload_type = %upload_type, file = %name, size = bytes.len(), "file uploaded");
    Ok(ok(UploadResponse {
        url: public_url(&state.upload.url_prefix, &upload_type, &name),
        name,
        size: bytes.len() as u64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_prefix_type_and_name() {
        assert_eq!(public_url("/uploads", "avatar", "a.png"), "/uploads/avatar/a.png");
        assert_eq!(public_url("/uploads/", "logo", "b.jpg"), "/uploads/logo/b.jpg");
    }

    #[test]
    fn validator_errors_map_to_upload_codes() {
        let e: ApiError = UploadError::BadExtension(".gif".into()).into();
        assert_eq!(e.code, ErrCode::ErrorUploadCheckFileFormat);
        let e: ApiError = UploadError::TooWide { max: 1024 }.into();
        assert_eq!(e.code, ErrCode::ErrorUploadCheckFileFail);
        let e: ApiError = UploadError::UnknownType("video".into()).into();
        assert_eq!(e.code, ErrCode::ErrorUploadInvalidType);
    }
}
