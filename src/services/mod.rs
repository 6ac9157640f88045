//! Stateless operations over the repository traits. Each function validates
//! its input, performs the remote call and maps failures to [`ServiceError`].

pub mod auth;
pub mod campaigns;
pub mod errors;
pub mod export;
pub mod leads;
pub mod templates;

pub use errors::{ErrorKind, ServiceError, ServiceResult};
