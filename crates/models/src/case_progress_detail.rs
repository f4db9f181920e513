use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::case_progress;

/// One stage transition of a case; rows are never edited after insert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "law_case_progress_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub progress_id: i32,
    pub stage: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub attachments: String,
    pub created_on: i64,
    pub modified_on: i64,
    #[serde(skip_serializing, default)]
    pub deleted_on: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Progress,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Progress => Entity::belongs_to(case_progress::Entity)
                .from(Column::ProgressId)
                .to(case_progress::Column::Id)
                .into(),
        }
    }
}

impl Related<case_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
