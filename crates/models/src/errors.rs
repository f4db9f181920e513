use thiserror::Error;

/// Raised by the field validators on entity input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}
