//! Wire-level request and response bodies exchanged with the REST API.

pub mod auth;
pub mod campaigns;
pub mod leads;
pub mod templates;

use serde::Deserialize;

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
