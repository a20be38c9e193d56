//! Transport capability consumed by the gateway.
//!
//! The gateway never talks to the network directly. It hands an
//! [`ApiRequest`] to a [`Transport`] and gets back a status code and a JSON
//! body. [`crate::host::http::HttpClient`] is the production transport; tests
//! plug in canned responders.

use async_trait::async_trait;
use rankscope_core::HttpMethod;
use serde_json::{Map, Value};

use crate::error::HttpError;

/// Request parameters (query string for GET, JSON body for POST).
pub type Params = Map<String, Value>;

/// A fully resolved provider request.
#[derive(Clone)]
pub struct ApiRequest {
    /// Provider base URL.
    pub base_url: String,
    /// Endpoint path, starting with `/`.
    pub path: String,
    /// Request parameters.
    pub params: Params,
    /// HTTP method.
    pub method: HttpMethod,
    /// API key sent as `Authorization: Token <key>`.
    pub auth_token: String,
}

impl ApiRequest {
    /// Full request URL without the query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    /// Parameters flattened to string pairs for a query string.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Status code and decoded body of a provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body. Non-JSON bodies arrive as a string value, empty ones as null.
    pub body: Value,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs provider requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the status and body.
    ///
    /// Non-2xx statuses are not errors at this layer; only failures to obtain
    /// a response are.
    async fn perform(&self, request: &ApiRequest) -> Result<TransportResponse, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(params: Value) -> ApiRequest {
        ApiRequest {
            base_url: "https://api.example.com/".to_string(),
            path: "/v1/domain/keywords".to_string(),
            params: params.as_object().cloned().unwrap_or_default(),
            method: HttpMethod::Get,
            auth_token: "secret".to_string(),
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        assert_eq!(
            request(json!({})).url(),
            "https://api.example.com/v1/domain/keywords"
        );
    }

    #[test]
    fn test_query_pairs_stringify_and_skip_null() {
        let pairs = request(json!({"domain": "a.com", "limit": 500, "skip": null})).query_pairs();
        assert!(pairs.contains(&("domain".to_string(), "a.com".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "500".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", request(json!({})));
        assert!(!debug.contains("secret"));
    }
}
