//! Domain aggregates exposed by the lead-generation service layer.

pub mod auth;
pub mod campaign;
pub mod lead;
pub mod template;
pub mod types;
