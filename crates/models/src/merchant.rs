use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 20;
pub const DEFAULT_RATING: f64 = 5.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merchant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub cover_image: String,
    pub business_license: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub address: String,
    pub longitude: f64,
    pub latitude: f64,
    pub rating: f64,
    pub month_sales: i32,
    pub business_hours: String,
    pub table_count: i32,
    pub admin_id: i32,
    /// See [`MerchantStatus`].
    pub status: i32,
    pub notice: String,
    pub created_on: i64,
    pub modified_on: i64,
    #[serde(skip_serializing, default)]
    pub deleted_on: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stored as an integer in `merchant.status`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MerchantStatus {
    Resting = 0,
    #[default]
    Open = 1,
    PendingReview = 2,
    Disabled = 3,
}

impl MerchantStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for MerchantStatus {
    type Error = errors::ModelError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(MerchantStatus::Resting),
            1 => Ok(MerchantStatus::Open),
            2 => Ok(MerchantStatus::PendingReview),
            3 => Ok(MerchantStatus::Disabled),
            other => Err(errors::ModelError::Validation(format!("unknown merchant status {other}"))),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate::required_max("name", name, NAME_MAX_CHARS)
}

pub fn validate_contact_phone(phone: &str) -> Result<(), errors::ModelError> {
    validate::max_chars("contact_phone", phone, PHONE_MAX_CHARS)
}

pub fn validate_rating(rating: f64) -> Result<(), errors::ModelError> {
    if !rating.is_finite() {
        return Err(errors::ModelError::Validation("rating must be a finite number".into()));
    }
    validate::in_range("rating", rating, 0.0..=MAX_RATING)
}

pub fn validate_coordinates(longitude: f64, latitude: f64) -> Result<(), errors::ModelError> {
    validate::longitude(longitude)?;
    validate::latitude(latitude)
}
