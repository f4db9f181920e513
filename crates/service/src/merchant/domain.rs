use models::merchant::{self, MerchantStatus};
use models::validate;
use serde::Serialize;

use crate::errors::ServiceError;

/// Equality filters; `None` and blank strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct MerchantFilter {
    pub name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub status: Option<i32>,
    pub admin_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewMerchant {
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
    pub rating: Option<f64>,
    pub month_sales: i32,
    pub business_hours: String,
    pub table_count: i32,
    pub admin_id: i32,
    pub status: Option<i32>,
    pub notice: String,
}

fn validate_status(status: i32) -> Result<(), ServiceError> {
    MerchantStatus::try_from(status)?;
    Ok(())
}

fn non_negative(field: &str, v: i32) -> Result<(), ServiceError> {
    if v < 0 {
        return Err(ServiceError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

impl NewMerchant {
    pub fn validate(&self) -> Result<(), ServiceError> {
        merchant::validate_name(&self.name)?;
        merchant::validate_contact_phone(&self.contact_phone)?;
        merchant::validate_coordinates(self.longitude, self.latitude)?;
        if let Some(r) = self.rating {
            merchant::validate_rating(r)?;
        }
        if let Some(s) = self.status {
            validate_status(s)?;
        }
        if self.admin_id < 1 {
            return Err(ServiceError::Validation("admin_id must be >= 1".into()));
        }
        non_negative("month_sales", self.month_sales)?;
        non_negative("table_count", self.table_count)?;
        Ok(())
    }
}

/// Partial update; `None` leaves the column untouched. `admin_id` is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct MerchantUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub business_license: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub rating: Option<f64>,
    pub month_sales: Option<i32>,
    pub business_hours: Option<String>,
    pub table_count: Option<i32>,
    pub status: Option<i32>,
    pub notice: Option<String>,
}

impl MerchantUpdate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.name {
            merchant::validate_name(n)?;
        }
        if let Some(p) = &self.contact_phone {
            merchant::validate_contact_phone(p)?;
        }
        if let Some(lon) = self.longitude {
            validate::longitude(lon)?;
        }
        if let Some(lat) = self.latitude {
            validate::latitude(lat)?;
        }
        if let Some(r) = self.rating {
            merchant::validate_rating(r)?;
        }
        if let Some(s) = self.status {
            validate_status(s)?;
        }
        if let Some(v) = self.month_sales {
            non_negative("month_sales", v)?;
        }
        if let Some(v) = self.table_count {
            non_negative("table_count", v)?;
        }
        Ok(())
    }
}

/// Centre point and radius in metres.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
}

impl NearbyQuery {
    pub fn validate(&self) -> Result<(), ServiceError> {
        merchant::validate_coordinates(self.longitude, self.latitude)?;
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(ServiceError::Validation("distance must be a non-negative number of metres".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyMerchant {
    #[serde(flatten)]
    pub merchant: merchant::Model,
    /// Metres from the query point.
    pub distance: f64,
}
