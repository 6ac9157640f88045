use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Classifies a non-2xx response. `message` is the server-provided
    /// message when the body carried one, otherwise a generic description.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RepositoryError::Unauthorized(message)
            }
            StatusCode::NOT_FOUND => RepositoryError::NotFound(message),
            s if s.is_client_error() => RepositoryError::ValidationError(message),
            s => RepositoryError::ServerError {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// Message suitable for display, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::NotFound(message)
            | RepositoryError::Unauthorized(message)
            | RepositoryError::ValidationError(message)
            | RepositoryError::ConnectionError(message)
            | RepositoryError::Unexpected(message)
            | RepositoryError::ServerError { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::ConnectionError(format!("Request timed out: {err}"))
        } else if err.is_connect() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            RepositoryError::Unexpected(format!("Invalid response body: {err}"))
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status, err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Unexpected(format!("Invalid response body: {err}"))
    }
}
