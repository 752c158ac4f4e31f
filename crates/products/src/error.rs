//! Service-level error model.

use thiserror::Error;

use shopadmin_core::DomainError;

use crate::repository::StorageError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a listing or status operation.
///
/// Negative outcomes of well-formed requests (an empty listing, a status
/// change that matched no product) are not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller supplied malformed or out-of-range input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The repository failed; passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::InvalidArgument(msg),
        }
    }
}
