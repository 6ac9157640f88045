//! Form definitions validating raw dashboard input into domain payloads.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod campaigns;
pub mod leads;
pub mod templates;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid tenant id")]
    InvalidTenantId,

    #[error("invalid lead id")]
    InvalidLeadId,

    #[error("invalid template id")]
    InvalidTemplateId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid timestamp, expected RFC 3339")]
    InvalidTimestamp,

    #[error("invalid template body")]
    InvalidBody,

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("csv error: {0}")]
    Csv(String),
}

/// Trims an optional input, mapping blank values to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
