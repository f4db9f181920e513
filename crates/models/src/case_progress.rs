use std::ops::RangeInclusive;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{case_progress_detail, errors, validate};

pub const CASE_TYPE_RANGE: RangeInclusive<i32> = 1..=5;
pub const STAGE_RANGE: RangeInclusive<i32> = 1..=5;
pub const CASE_STATUS_RANGE: RangeInclusive<i32> = 1..=3;
pub const CODE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 1000;
pub const ATTACHMENTS_MAX_CHARS: usize = 2000;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "law_case_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_code: String,
    pub service_version: i32,
    pub lawyer_code: String,
    /// Client identifier.
    pub open_id: String,
    pub case_type: i32,
    pub current_stage: i32,
    pub case_status: i32,
    pub created_on: i64,
    pub modified_on: i64,
    #[serde(skip_serializing, default)]
    pub deleted_on: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Detail,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Detail => Entity::has_many(case_progress_detail::Entity).into(),
        }
    }
}

impl Related<case_progress_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Detail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_case_type(v: i32) -> Result<(), errors::ModelError> {
    validate::in_range("case_type", v, CASE_TYPE_RANGE)
}

pub fn validate_stage(v: i32) -> Result<(), errors::ModelError> {
    validate::in_range("current_stage", v, STAGE_RANGE)
}

pub fn validate_case_status(v: i32) -> Result<(), errors::ModelError> {
    validate::in_range("case_status", v, CASE_STATUS_RANGE)
}

pub fn validate_content(v: &str) -> Result<(), errors::ModelError> {
    validate::required_max("content", v, CONTENT_MAX_CHARS)
}

pub fn validate_attachments(v: &str) -> Result<(), errors::ModelError> {
    validate::max_chars("attachments", v, ATTACHMENTS_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_match_form_constraints() {
        assert!(validate_case_type(1).is_ok());
        assert!(validate_case_type(5).is_ok());
        assert!(validate_case_type(0).is_err());
        assert!(validate_case_type(6).is_err());
        assert!(validate_stage(5).is_ok());
        assert!(validate_stage(6).is_err());
        assert!(validate_case_status(3).is_ok());
        assert!(validate_case_status(4).is_err());
    }

    #[test]
    fn content_is_mandatory_and_bounded() {
        assert!(validate_content("").is_err());
        assert!(validate_content("立案").is_ok());
        assert!(validate_content(&"字".repeat(CONTENT_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn deletion_marker_is_not_serialized() {
        let m = Model {
            id: 1,
            service_code: "S1".into(),
            service_version: 1,
            lawyer_code: "L1".into(),
            open_id: "o1".into(),
            case_type: 1,
            current_stage: 1,
            case_status: 1,
            created_on: 10,
            modified_on: 10,
            deleted_on: 0,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("deleted_on").is_none());
        assert_eq!(json["current_stage"], 1);
    }
}
