use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Message safe to hand back to a client; storage details stay in the logs.
    pub fn client_message(&self) -> Option<String> {
        match self {
            ServiceError::Validation(m) | ServiceError::Conflict(m) => Some(m.clone()),
            ServiceError::Model(models::errors::ModelError::Validation(m)) => Some(m.clone()),
            ServiceError::NotFound(_) | ServiceError::Db(_) => None,
        }
    }

    /// Validation failures raised by either layer.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_)))
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { ServiceError::Db(e.to_string()) }
}
