//! Conversions between the error types of each layer.
//!
//! The domain and form layers must not depend on repository or service error
//! types, so the glue lives here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound(message) => ServiceError::NotFound(message),
            RepositoryError::Unauthorized(message) => ServiceError::Unauthorized(message),
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            RepositoryError::ConnectionError(message) => ServiceError::Network(message),
            RepositoryError::ServerError { message, .. } | RepositoryError::Unexpected(message) => {
                ServiceError::Server(message)
            }
        }
    }
}
