use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod categories;
pub mod search;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to callers of the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,
    /// A user-supplied payload failed validation.
    #[error("{0}")]
    Form(String),
    /// A collaborator failed while servicing the request.
    #[error("{0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
