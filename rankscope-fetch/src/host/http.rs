//! HTTP transport with tracing and domain allowlist.
//!
//! This module provides the production [`Transport`]:
//! - Request/response tracing
//! - Domain allowlist so the API key is only ever sent to the provider
//! - `Authorization: Token <key>` authentication
//! - Query-string parameters for GET, JSON bodies for POST

use std::time::Duration;

use async_trait::async_trait;
use rankscope_core::HttpMethod;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;
use crate::transport::{ApiRequest, Transport, TransportResponse};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for RankScope.
const USER_AGENT: &str = concat!("RankScope/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    ///
    /// An empty list leaves the client unrestricted.
    pub fn allow_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = if domains.is_empty() {
            None
        } else {
            Some(domains)
        };
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }
}

/// Decodes a response body: JSON when possible, raw text otherwise.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn perform(&self, request: &ApiRequest) -> Result<TransportResponse, HttpError> {
        let url = request.url();
        self.is_domain_allowed(&url)?;

        let auth = format!("Token {}", request.auth_token);
        let builder = match request.method {
            HttpMethod::Get => self.inner.get(&url).query(&request.query_pairs()),
            HttpMethod::Post => self.inner.post(&url).json(&request.params),
        };

        let response = builder
            .header(header::AUTHORIZATION, auth)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| if e.is_timeout() { HttpError::Timeout } else { HttpError::Request(e) })?;

        let status = response.status().as_u16();
        debug!(status, "Response received");

        let text = response.text().await?;
        Ok(TransportResponse {
            status,
            body: decode_body(&text),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpClient::new().expect("client builds")
    }

    #[test]
    fn test_domain_allowlist() {
        let client = client().allow_domains(vec!["api.rankdata.dev".to_string()]);

        assert!(client.is_domain_allowed("https://api.rankdata.dev/v1/domain/overview").is_ok());
        assert!(client.is_domain_allowed("https://eu.api.rankdata.dev/v1").is_ok());
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://rankdata.dev.evil.com").is_err());
    }

    #[test]
    fn test_empty_allowlist_is_unrestricted() {
        let client = client().allow_domains(Vec::new());
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = client();
        assert!(matches!(
            client.is_domain_allowed("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body(r#"{"a":1}"#), serde_json::json!({"a": 1}));
        assert_eq!(decode_body("Bad Gateway"), Value::String("Bad Gateway".into()));
    }
}
