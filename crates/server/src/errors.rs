use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use service::errors::ServiceError;

use crate::response::{Envelope, ErrCode};

/// Which resource a failing handler belongs to; picks the not-exist and conflict codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Lawyer,
    CaseProgress,
    Merchant,
}

impl Resource {
    fn not_found(self) -> ErrCode {
        match self {
            Resource::Lawyer => ErrCode::ErrorNotExistLawyer,
            Resource::CaseProgress => ErrCode::ErrorNotExistProgress,
            Resource::Merchant => ErrCode::ErrorNotExistMerchant,
        }
    }

    fn conflict(self, failure: ErrCode) -> ErrCode {
        match self {
            Resource::Lawyer => ErrCode::ErrorExistLawyer,
            Resource::CaseProgress | Resource::Merchant => failure,
        }
    }
}

/// Error half of every handler: an HTTP status plus an envelope code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrCode,
    pub detail: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrCode) -> Self {
        Self { status, code, detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrCode::InvalidParams).with_detail(msg.into())
    }

    pub fn not_found(resource: Resource) -> Self {
        Self::new(StatusCode::NOT_FOUND, resource.not_found())
    }

    pub fn unauthorized(code: ErrCode) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code)
    }

    /// Maps a service failure; storage errors are logged and reported as `failure` without detail.
    pub fn service(resource: Resource, failure: ErrCode, e: ServiceError) -> Self {
        if e.is_validation() {
            let msg = e.client_message().unwrap_or_else(|| e.to_string());
            return Self::invalid_params(msg);
        }
        match e {
            ServiceError::NotFound(_) => Self::not_found(resource),
            ServiceError::Conflict(msg) => {
                Self::new(StatusCode::BAD_REQUEST, resource.conflict(failure)).with_detail(msg)
            }
            other => {
                error!(resource = ?resource, code = failure.code(), error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::new(self.code, self.detail);
        (self.status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        warn!(error = %r.body_text(), "bad path parameter");
        Self::invalid_params(r.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        warn!(error = %r.body_text(), "bad query string");
        Self::invalid_params(r.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        warn!(error = %r.body_text(), "bad json body");
        Self::invalid_params(r.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(#[from] sea_orm::DbErr),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn validation_becomes_invalid_params_with_message() {
        let e: ServiceError = ModelError::Validation("case_type must be within [1, 5], got 6".into()).into();
        let api = ApiError::service(Resource::CaseProgress, ErrCode::ErrorAddProgressFail, e);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, ErrCode::InvalidParams);
        assert_eq!(api.detail, Some(Value::from("case_type must be within [1, 5], got 6")));
    }

    #[test]
    fn not_found_uses_resource_code() {
        let api = ApiError::service(Resource::Merchant, ErrCode::ErrorGetMerchantFail, ServiceError::not_found("merchant"));
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.code, ErrCode::ErrorNotExistMerchant);
    }

    #[test]
    fn lawyer_conflict_uses_exist_code() {
        let e = ServiceError::Conflict("lawyer_code already exists".into());
        let api = ApiError::service(Resource::Lawyer, ErrCode::ErrorAddLawyerFail, e);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, ErrCode::ErrorExistLawyer);
    }

    #[test]
    fn db_errors_hide_detail() {
        let api = ApiError::service(Resource::Lawyer, ErrCode::ErrorGetLawyerFail, ServiceError::Db("disk I/O error".into()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code, ErrCode::ErrorGetLawyerFail);
        assert!(api.detail.is_none());
    }
}
