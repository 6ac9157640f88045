//! Shared HTTP client for the REST API.
//!
//! Every request goes through [`ApiClient`], which prefixes the configured
//! base URL, injects the bearer token when one is available and reports
//! `401 Unauthorized` responses to a process-wide hook so the session can be
//! torn down regardless of which call triggered it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::ErrorBody;
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Returns the bearer token to attach to the next request, if any.
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Invoked whenever the API answers `401 Unauthorized`.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token_provider: Option<TokenProvider>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token_provider", &self.token_provider.is_some())
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Builds a client with the configured base URL and a single timeout
    /// applied to every call.
    pub fn new(config: &ClientConfig) -> RepositoryResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_provider: None,
            on_unauthorized: None,
        })
    }

    /// Registers the source of bearer tokens.
    pub fn with_token_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    /// Registers the callback run on `401 Unauthorized`.
    pub fn with_unauthorized_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token_provider.as_ref().and_then(|provider| provider()) {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Sends the request and turns non-2xx responses into errors.
    async fn execute(&self, builder: RequestBuilder) -> RepositoryResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Unauthorized response from {url}, ending session");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        } else {
            log::debug!("Request to {url} failed with {status}: {message}");
        }

        Err(RepositoryError::from_status(status, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<T> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    /// Like [`ApiClient::get`] but maps `404 Not Found` to `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<Option<T>> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> RepositoryResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Sends a JSON body with any method. Some endpoints read the tenant
    /// scope from the body even on `GET` and `DELETE`.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(method, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// Sends a request whose response body is ignored.
    pub async fn send_discarding<B>(&self, method: Method, path: &str, body: Option<&B>) -> RepositoryResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, path);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.execute(builder).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> RepositoryResult<()> {
        self.send_discarding::<()>(Method::DELETE, path, None).await
    }
}

/// Extracts the display message of a failed response: the body's `message`
/// when present, otherwise a generic description of the status.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
        .expect("client builds")
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let api = client("https://api.example.com/");
        assert_eq!(api.url("/leads"), "https://api.example.com/leads");
        assert_eq!(api.url("leads/tenant/t-1"), "https://api.example.com/leads/tenant/t-1");
    }

    #[test]
    fn error_message_prefers_server_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Email already used"}"#),
            "Email already used"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Request failed with status code 500"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"  "}"#),
            "Request failed with status code 404"
        );
    }

    #[test]
    fn token_provider_injects_bearer_header() {
        let api = client("http://localhost").with_token_provider(|| Some("abc".to_string()));
        let request = api
            .request(Method::GET, "/leads")
            .build()
            .expect("request builds");
        assert_eq!(
            request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer abc")
        );

        let anonymous = client("http://localhost").with_token_provider(|| None);
        let request = anonymous
            .request(Method::GET, "/leads")
            .build()
            .expect("request builds");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
