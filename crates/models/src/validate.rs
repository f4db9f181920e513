//! Field checks shared by the entity modules.
//!
//! Lengths are counted in characters, not bytes: names and case notes are
//! mostly CJK text.

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::errors::ModelError;

pub fn required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// `required` + `max_chars` in one call.
pub fn required_max(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    required(field, value)?;
    max_chars(field, value, max)
}

pub fn in_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> Result<(), ModelError>
where
    T: PartialOrd + Display + Copy,
{
    if !range.contains(&value) {
        return Err(ModelError::Validation(format!(
            "{field} must be within [{}, {}], got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

pub fn longitude(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() {
        return Err(ModelError::Validation("longitude must be a finite number".into()));
    }
    in_range("longitude", value, -180.0..=180.0)
}

pub fn latitude(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() {
        return Err(ModelError::Validation("latitude must be a finite number".into()));
    }
    in_range("latitude", value, -90.0..=90.0)
}
