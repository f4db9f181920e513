use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

pub const NAME_MAX_CHARS: usize = 50;
pub const CODE_MAX_CHARS: usize = 50;
pub const PHONE_MAX_CHARS: usize = 20;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const LAW_FIRM_MAX_CHARS: usize = 100;
pub const LICENSE_MAX_CHARS: usize = 50;
pub const LEGAL_FIELD_MAX_CHARS: usize = 100;
pub const AVATAR_MAX_CHARS: usize = 255;
pub const INTRODUCTION_MAX_CHARS: usize = 5000;

/// Full lawyer row. Serializing it yields the private projection; use
/// [`PublicLawyer`] for anything served to anonymous callers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "law_lawyer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub lawyer_code: String,
    pub open_id: String,
    pub name: String,
    pub avatar: String,
    pub phone: String,
    pub email: String,
    pub law_firm: String,
    pub license_no: String,
    pub legal_field: String,
    pub practice_years: i32,
    #[sea_orm(column_type = "Text")]
    pub introduction: String,
    pub status: i32,
    pub audit_status: i32,
    pub audit_remark: String,
    pub view_count: i64,
    pub like_count: i64,
    pub version: i32,
    pub create_by: String,
    pub create_time: i64,
    pub update_by: String,
    pub update_time: i64,
    pub delete_by: String,
    pub delete_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Operational state, independent of moderation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LawyerStatus {
    Disabled = 0,
    Active = 1,
}

/// Moderation state of a profile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuditStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl LawyerStatus {
    pub fn code(self) -> i32 { self as i32 }
}

impl AuditStatus {
    pub fn code(self) -> i32 { self as i32 }
}

/// Redacted view: no contact details, owner identity, licence or moderation data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLawyer {
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

impl From<Model> for PublicLawyer {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            lawyer_code: m.lawyer_code,
            name: m.name,
            avatar: m.avatar,
            law_firm: m.law_firm,
            legal_field: m.legal_field,
            practice_years: m.practice_years,
            introduction: m.introduction,
            view_count: m.view_count,
            like_count: m.like_count,
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate::required_max("name", name, NAME_MAX_CHARS)
}

pub fn validate_code(code: &str) -> Result<(), errors::ModelError> {
    validate::required_max("lawyer_code", code, CODE_MAX_CHARS)
}

pub fn validate_phone(phone: &str) -> Result<(), errors::ModelError> {
    validate::required_max("phone", phone, PHONE_MAX_CHARS)?;
    if !phone.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == ' ') {
        return Err(errors::ModelError::Validation("phone may only contain digits, '+', '-' and spaces".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    validate::max_chars("email", email, EMAIL_MAX_CHARS)?;
    if !email.is_empty() && !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_practice_years(years: i32) -> Result<(), errors::ModelError> {
    validate::in_range("practice_years", years, 0..=80)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        Model {
            id: 7,
            lawyer_code: "LAW-007".into(),
            open_id: "wx-open-7".into(),
            name: "王律师".into(),
            avatar: "/uploads/avatar/a.png".into(),
            phone: "13800000000".into(),
            email: "wang@example.com".into(),
            law_firm: "金杜".into(),
            license_no: "11101201010000000".into(),
            legal_field: "劳动争议".into(),
            practice_years: 8,
            introduction: "".into(),
            status: LawyerStatus::Active.code(),
            audit_status: AuditStatus::Approved.code(),
            audit_remark: "ok".into(),
            view_count: 3,
            like_count: 1,
            version: 2,
            create_by: "wx-open-7".into(),
            create_time: 1,
            update_by: "".into(),
            update_time: 0,
            delete_by: "".into(),
            delete_time: 0,
        }
    }

    #[test]
    fn public_projection_hides_private_fields() {
        let json = serde_json::to_value(PublicLawyer::from(sample())).unwrap();
        for hidden in ["phone", "email", "open_id", "license_no", "audit_status", "audit_remark", "version", "create_by"] {
            assert!(json.get(hidden).is_none(), "{hidden} leaked");
        }
        assert_eq!(json["lawyer_code"], "LAW-007");
        assert_eq!(json["view_count"], 3);
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+86 138-0000-0000").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn email_is_optional_but_checked() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b.cn").is_ok());
    }
}
