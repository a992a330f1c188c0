use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Second account for a mobile number, however storage detected it.
    pub fn already_registered(mobile_number: &str) -> Self {
        Self::AlreadyExists(format!("Loan already registered with given mobileNumber {}", mobile_number))
    }

    /// Stable code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::AlreadyExists(_) => "ALREADY_EXISTS",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Db(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
