//! HTTP client abstraction for Algorand API requests.

use reqwest::Client;
use std::time::Duration;

use crate::codec::IntDecoding;
use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::domain::AlgoError;

use super::request::JsonRequest;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: 4,
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Base HTTP client wrapper
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, AlgoError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the TLS backend cannot be initialized.
    pub fn with_config(config: HttpConfig) -> Result<Self, AlgoError> {
        let inner = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlgoError::client_init(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Get the inner reqwest client
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build a GET request with standard headers
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .get(url)
            .header("accept", "application/json")
            .timeout(self.config.timeout)
    }
}

// ============================================================================
// Service Endpoint
// ============================================================================

/// One REST service: base URL, auth header and default decoding policy.
///
/// [`super::NodeClient`] and [`super::IndexerClient`] each own one of these
/// and differ only in the token header and endpoint paths.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    http: HttpClient,
    base_url: String,
    token_header: &'static str,
    token: Option<String>,
    int_decoding: IntDecoding,
}

impl ServiceEndpoint {
    #[must_use]
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        token_header: &'static str,
        token: Option<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_header,
            token,
            int_decoding: IntDecoding::Default,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[must_use]
    pub const fn int_decoding(&self) -> IntDecoding {
        self.int_decoding
    }

    pub fn set_int_decoding(&mut self, policy: IntDecoding) {
        self.int_decoding = policy;
    }

    /// Start a request for `path`, which must begin with `/`.
    #[must_use]
    pub fn request(&self, path: impl Into<String>) -> JsonRequest<'_> {
        JsonRequest::new(self, path)
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Build a request with appropriate authentication
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.get(&url);

        if let Some(token) = &self.token {
            req = req.header(self.token_header, token);
        }

        req
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(HttpConfig::with_timeout(Duration::from_secs(2)).timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let http = HttpClient::new().unwrap();
        let endpoint = ServiceEndpoint::new(http, "http://localhost:4001/", "X-Test", None);
        assert_eq!(endpoint.base_url(), "http://localhost:4001");
    }

    #[test]
    fn test_endpoint_auth_header() {
        let http = HttpClient::new().unwrap();
        let mut endpoint = ServiceEndpoint::new(http, "http://localhost:4001", "X-Test", Some("secret".into()));

        let request = endpoint.get("/health").build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:4001/health");
        assert_eq!(request.headers()["X-Test"], "secret");
        assert_eq!(request.headers()["accept"], "application/json");

        endpoint.set_token(None);
        let request = endpoint.get("/health").build().unwrap();
        assert!(request.headers().get("X-Test").is_none());
    }

    #[test]
    fn test_endpoint_default_decoding() {
        let http = HttpClient::new().unwrap();
        let mut endpoint = ServiceEndpoint::new(http, "http://localhost", "X-Test", None);
        assert_eq!(endpoint.int_decoding(), IntDecoding::Default);

        endpoint.set_int_decoding(IntDecoding::BigInt);
        assert_eq!(endpoint.int_decoding(), IntDecoding::BigInt);
    }
}
