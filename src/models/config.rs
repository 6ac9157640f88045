//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Default API base used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "https://ai-sales-api-poc-production.up.railway.app";

/// Default timeout applied to every HTTP call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, Deserialize)]
/// Connection settings for the lead-generation API.
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Tenant the command-line front end operates on when none is given.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Pre-issued bearer token, skipping the login round trip.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tenant_id: None,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"tenant_id": "t-1"}"#).expect("valid config");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.tenant_id.as_deref(), Some("t-1"));
        assert_eq!(config.token, None);
    }
}
