use thiserror::Error;

/// Result type returned by collaborator implementations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the remote catalog collaborators.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend could not be reached.
    #[error("network failure: {0}")]
    Network(String),
    /// The backend answered with an error payload.
    #[error("backend error: {0}")]
    Backend(String),
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,
    /// The backend payload could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
