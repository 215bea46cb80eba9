use thiserror::Error;

/// State-toggle invariants that a request tried to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictKind {
    #[error("already following this account")]
    AlreadyFollowing,
    #[error("not following this account")]
    NotFollowing,
    #[error("review is already scrapped")]
    AlreadyScrapped,
    #[error("review is not scrapped yet")]
    NotYetScrapped,
    #[error("account id is already registered")]
    AccountIdAlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Conflict: {0}")]
    Conflict(ConflictKind),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(err: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(err.to_string())
    }
}
