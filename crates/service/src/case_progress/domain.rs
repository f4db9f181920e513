use models::case_progress::{self, CODE_MAX_CHARS};
use models::{case_progress_detail, validate};
use serde::Serialize;

use crate::errors::ServiceError;

/// Equality filters for listing; empty strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct CaseProgressFilter {
    pub lawyer_code: Option<String>,
    pub open_id: Option<String>,
    pub service_code: Option<String>,
}

impl CaseProgressFilter {
    pub(crate) fn non_empty(v: &Option<String>) -> Option<&str> {
        v.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct NewCaseProgress {
    pub service_code: String,
    pub service_version: i32,
    pub lawyer_code: String,
    pub open_id: String,
    pub case_type: i32,
    pub current_stage: i32,
    pub case_status: i32,
    /// Note for the first detail row.
    pub content: String,
    pub attachments: String,
}

impl NewCaseProgress {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required_max("service_code", &self.service_code, CODE_MAX_CHARS)?;
        if self.service_version < 1 {
            return Err(ServiceError::Validation("service_version must be >= 1".into()));
        }
        validate::required_max("lawyer_code", &self.lawyer_code, CODE_MAX_CHARS)?;
        validate::required_max("open_id", &self.open_id, CODE_MAX_CHARS)?;
        case_progress::validate_case_type(self.case_type)?;
        case_progress::validate_stage(self.current_stage)?;
        case_progress::validate_case_status(self.case_status)?;
        case_progress::validate_content(&self.content)?;
        case_progress::validate_attachments(&self.attachments)?;
        Ok(())
    }
}

/// Stage transition. Only the mutable columns exist here.
#[derive(Debug, Clone)]
pub struct CaseProgressUpdate {
    pub current_stage: i32,
    pub case_status: i32,
    pub content: String,
    pub attachments: String,
}

impl CaseProgressUpdate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        case_progress::validate_stage(self.current_stage)?;
        case_progress::validate_case_status(self.case_status)?;
        case_progress::validate_content(&self.content)?;
        case_progress::validate_attachments(&self.attachments)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewDetail {
    pub progress_id: i32,
    pub stage: i32,
    pub content: String,
    pub attachments: String,
}

/// A progress with its history, newest entry first.
#[derive(Debug, Clone, Serialize)]
pub struct CaseProgressView {
    pub progress: case_progress::Model,
    pub details: Vec<case_progress_detail::Model>,
}
