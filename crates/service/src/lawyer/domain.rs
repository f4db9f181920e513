use models::lawyer::{self, PublicLawyer};
use models::validate;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// How a public profile is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LawyerLookup {
    Id(i32),
    Code(String),
}

#[derive(Debug, Clone, Default)]
pub struct LawyerListQuery {
    /// Substring match on `name`.
    pub name: Option<String>,
    /// Substring match on `legal_field`.
    pub legal_field: Option<String>,
    pub pagination: Pagination,
}

/// Directory page; `page` and `page_size` are the normalised values actually used.
#[derive(Debug, Clone, Serialize)]
pub struct LawyerListPage {
    pub lists: Vec<PublicLawyer>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct NewLawyer {
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

fn validate_optional_text(
    avatar: Option<&str>,
    email: Option<&str>,
    law_firm: Option<&str>,
    license_no: Option<&str>,
    legal_field: Option<&str>,
    introduction: Option<&str>,
) -> Result<(), ServiceError> {
    if let Some(v) = avatar { validate::max_chars("avatar", v, lawyer::AVATAR_MAX_CHARS)?; }
    if let Some(v) = email { lawyer::validate_email(v)?; }
    if let Some(v) = law_firm { validate::max_chars("law_firm", v, lawyer::LAW_FIRM_MAX_CHARS)?; }
    if let Some(v) = license_no { validate::max_chars("license_no", v, lawyer::LICENSE_MAX_CHARS)?; }
    if let Some(v) = legal_field { validate::max_chars("legal_field", v, lawyer::LEGAL_FIELD_MAX_CHARS)?; }
    if let Some(v) = introduction { validate::max_chars("introduction", v, lawyer::INTRODUCTION_MAX_CHARS)?; }
    Ok(())
}

impl NewLawyer {
    pub fn validate(&self) -> Result<(), ServiceError> {
        lawyer::validate_name(&self.name)?;
        lawyer::validate_code(&self.lawyer_code)?;
        lawyer::validate_phone(&self.phone)?;
        lawyer::validate_practice_years(self.practice_years)?;
        validate_optional_text(
            Some(&self.avatar),
            Some(&self.email),
            Some(&self.law_firm),
            Some(&self.license_no),
            Some(&self.legal_field),
            Some(&self.introduction),
        )
    }
}

/// Owner-editable profile fields. Identity, audit, counters and stamps have no
/// slot here, so they cannot be changed through an update.
#[derive(Debug, Clone, Default)]
pub struct LawyerProfileUpdate {
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

impl LawyerProfileUpdate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(v) = &self.name { lawyer::validate_name(v)?; }
        if let Some(v) = &self.phone { lawyer::validate_phone(v)?; }
        if let Some(v) = self.practice_years { lawyer::validate_practice_years(v)?; }
        validate_optional_text(
            self.avatar.as_deref(),
            self.email.as_deref(),
            self.law_firm.as_deref(),
            self.license_no.as_deref(),
            self.legal_field.as_deref(),
            self.introduction.as_deref(),
        )
    }
}
