//! HTTP client for the storefront backend.

use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default backend.
pub const DEFAULT_BASE_URL: &str = "https://workintech-fe-ecommerce.onrender.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Auth token sent as-is in the `Authorization` header.
    pub token: Option<SecretString>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JSON client bound to one backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the token is not a
    /// valid header value.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|e| FetchError::Request(format!("Invalid token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.get_with_query(path, &[]).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        handle_response(response).await
    }

    /// POST a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let response = self.inner.client.post(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    /// PUT a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let response = self.inner.client.put(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    /// DELETE a resource, ignoring any body.
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(http_error(response).await)
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    if !response.status().is_success() {
        return Err(http_error(response).await);
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
}

async fn http_error(response: reqwest::Response) -> FetchError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    FetchError::Http {
        status,
        message: error_message(&body),
    }
}

/// Pull a message out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = ApiConfig::new("ftp://example.com");
        assert!(matches!(ApiClient::new(&config), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = ApiClient::new(&ApiConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.url("/products"), "http://localhost:8080/products");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"Token expired"}"#), "Token expired");
        assert_eq!(error_message(r#"{"error":"bad"}"#), "bad");
        assert_eq!(error_message(" Not Found "), "Not Found");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ApiConfig::default().with_token("secret-token");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
