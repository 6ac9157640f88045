use std::fmt;

use thiserror::Error;

/// Coarse classification of a failed operation, used by callers to decide
/// how to react (prompt a login, show a form error, offer a retry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Validation,
    NotFound,
    Unauthorized,
    ServerError,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Network => "network",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::ServerError => "server error",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Error returned by services and view-models. The display form is the
/// message meant for the user: the server's own message when it sent one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Server(String),

    #[error("Request cancelled")]
    Cancelled,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Network(_) => ErrorKind::Network,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Unauthorized(_) => ErrorKind::Unauthorized,
            ServiceError::Server(_) => ErrorKind::ServerError,
            ServiceError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = ServiceError::Validation("Email already used".to_string());
        assert_eq!(err.to_string(), "Email already used");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(ServiceError::Cancelled.kind(), ErrorKind::Cancelled);
    }
}
