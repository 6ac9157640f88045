//! Typed client for the lead-generation CRM API.
//!
//! The `data` feature exposes the domain model, wire bodies and input forms
//! only. The default `client` feature adds the HTTP transport, the repository
//! adapter, stateless services and the tenant-bound view-models.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "client")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod transport;
#[cfg(feature = "client")]
pub mod viewmodel;

#[cfg(feature = "client")]
use crate::models::config::ClientConfig;
#[cfg(feature = "client")]
use crate::repository::HttpRepository;
#[cfg(feature = "client")]
use crate::repository::errors::RepositoryResult;
#[cfg(feature = "client")]
use crate::transport::ApiClient;
#[cfg(feature = "client")]
use crate::viewmodel::auth::Session;

/// Builds the REST repository for `config`, authenticated through `session`.
///
/// The configured token, if any, is used until somebody signs in or the API
/// answers `401 Unauthorized`.
#[cfg(feature = "client")]
pub fn connect(config: &ClientConfig, session: &Session) -> RepositoryResult<HttpRepository> {
    let api = session.attach(ApiClient::new(config)?, config.token.clone());
    log::debug!("Using API at {}", api.base_url());
    Ok(HttpRepository::new(api))
}
