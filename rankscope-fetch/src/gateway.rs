//! The provider gateway.
//!
//! All provider traffic for one report run goes through a single
//! [`Gateway`]. It waits for a rate-limit token, sends the request over its
//! [`Transport`], classifies failures, bills the call against the credit
//! table and, when enabled, appends the call to the run's log.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rankscope_core::{CallLogEntry, Diagnostics, HttpMethod};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::credits::{CreditCostTable, count_records};
use crate::error::GatewayError;
use crate::host::http::{DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::rate_limit::{RateLimitConfig, TokenBucket};
use crate::transport::{ApiRequest, Params, Transport};

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.rankdata.dev";

// ============================================================================
// Gateway Config
// ============================================================================

/// Settings for a gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Token bucket parameters.
    pub rate_limit: RateLimitConfig,
    /// Whether to keep a per-call log.
    pub call_logging: bool,
    /// Credit prices.
    pub credit_costs: CreditCostTable,
    /// Per-request timeout for the default HTTP transport.
    pub request_timeout: Duration,
    /// Hosts the default HTTP transport may contact. Empty means any.
    pub allowed_hosts: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit: RateLimitConfig::default(),
            call_logging: true,
            credit_costs: CreditCostTable::builtin(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            allowed_hosts: Vec::new(),
        }
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// Rate-limited, credit-accounted access to the provider.
pub struct Gateway {
    config: GatewayConfig,
    api_key: String,
    transport: Arc<dyn Transport>,
    limiter: TokenBucket,
    calls: Mutex<Vec<CallLogEntry>>,
    notes: Mutex<Vec<String>>,
    total_credits: AtomicU64,
    call_count: AtomicU64,
}

impl Gateway {
    /// Creates a builder for configuring a gateway.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Returns the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Performs a GET call.
    pub async fn get(&self, endpoint: &str, params: Value) -> Result<Value, GatewayError> {
        self.call(endpoint, params, HttpMethod::Get).await
    }

    /// Performs a POST call.
    pub async fn post(&self, endpoint: &str, params: Value) -> Result<Value, GatewayError> {
        self.call(endpoint, params, HttpMethod::Post).await
    }

    /// Performs one provider call.
    ///
    /// `params` must be a JSON object (or null for none). The call waits for
    /// a rate-limit token first; the token wait is not part of the logged
    /// duration.
    #[instrument(skip(self, params), fields(endpoint = %endpoint, method = %method))]
    pub async fn call(
        &self,
        endpoint: &str,
        params: Value,
        method: HttpMethod,
    ) -> Result<Value, GatewayError> {
        let params = into_params(params)?;

        self.limiter.acquire().await;

        let request = ApiRequest {
            base_url: self.config.base_url.clone(),
            path: endpoint.to_string(),
            params,
            method,
            auth_token: self.api_key.clone(),
        };

        let timestamp = Utc::now();
        let started = tokio::time::Instant::now();
        let result = self.transport.perform(&request).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Provider call failed in transport");
                return Err(e.into());
            }
        };

        if !response.is_success() {
            let err = GatewayError::from_status(response.status, &response.body);
            warn!(status = response.status, error = %err, "Provider call rejected");
            return Err(err);
        }

        let records = count_records(&response.body);
        let credits = self.config.credit_costs.calculate_credits(endpoint, records);
        self.total_credits.fetch_add(credits, Ordering::Relaxed);
        self.call_count.fetch_add(1, Ordering::Relaxed);
        debug!(records, credits, duration_ms, "Provider call succeeded");

        if self.config.call_logging {
            let entry = CallLogEntry {
                endpoint: endpoint.to_string(),
                method,
                params: Value::Object(request.params),
                response: response.body.clone(),
                timestamp,
                duration_ms,
                records,
                credits,
            };
            lock(&self.calls).push(entry);
        }

        Ok(response.body)
    }

    /// Records a degradation note for the run's diagnostics.
    pub fn record_note(&self, note: impl Into<String>) {
        lock(&self.notes).push(note.into());
    }

    /// Notes recorded so far.
    pub fn notes(&self) -> Vec<String> {
        lock(&self.notes).clone()
    }

    /// Logged calls so far. Empty when call logging is disabled.
    pub fn call_log(&self) -> Vec<CallLogEntry> {
        lock(&self.calls).clone()
    }

    /// Credits charged so far.
    pub fn total_credits(&self) -> u64 {
        self.total_credits.load(Ordering::Relaxed)
    }

    /// Successful calls so far.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Snapshot of the run's diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            calls: self.call_log(),
            call_count: self.call_count(),
            total_credits: self.total_credits(),
            notes: self.notes(),
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("call_count", &self.call_count())
            .field("total_credits", &self.total_credits())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn into_params(params: Value) -> Result<Params, GatewayError> {
    match params {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(GatewayError::Configuration(format!(
            "request parameters must be an object, got {other}"
        ))),
    }
}

// ============================================================================
// Gateway Builder
// ============================================================================

/// Builder for constructing a [`Gateway`].
#[derive(Default)]
pub struct GatewayBuilder {
    config: GatewayConfig,
    api_key: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl GatewayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the provider base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the token bucket parameters.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Enables or disables the per-call log.
    pub fn call_logging(mut self, enabled: bool) -> Self {
        self.config.call_logging = enabled;
        self
    }

    /// Sets the credit prices.
    pub fn credit_costs(mut self, table: CreditCostTable) -> Self {
        self.config.credit_costs = table;
        self
    }

    /// Sets the transport. Defaults to [`HttpClient`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the gateway.
    ///
    /// Fails when no non-empty API key was given, the base URL does not
    /// parse, or the default HTTP client cannot be created.
    pub fn build(self) -> Result<Gateway, GatewayError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GatewayError::Configuration("no API key configured".to_string()))?;

        Url::parse(&self.config.base_url).map_err(|e| {
            GatewayError::Configuration(format!("invalid base URL {}: {e}", self.config.base_url))
        })?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                HttpClient::with_timeout(self.config.request_timeout)
                    .map_err(|e| GatewayError::Configuration(e.to_string()))?
                    .allow_domains(self.config.allowed_hosts.clone()),
            ),
        };

        Ok(Gateway {
            limiter: TokenBucket::new(self.config.rate_limit),
            config: self.config,
            api_key,
            transport,
            calls: Mutex::new(Vec::new()),
            notes: Mutex::new(Vec::new()),
            total_credits: AtomicU64::new(0),
            call_count: AtomicU64::new(0),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canned::CannedTransport;
    use serde_json::json;

    fn gateway(transport: CannedTransport, logging: bool) -> (Gateway, Arc<CannedTransport>) {
        let transport = Arc::new(transport);
        let gateway = Gateway::builder()
            .api_key("test-key")
            .call_logging(logging)
            .rate_limit(RateLimitConfig {
                capacity: 100,
                refill_per_second: 100.0,
            })
            .transport(transport.clone())
            .build()
            .unwrap();
        (gateway, transport)
    }

    #[test]
    fn test_build_requires_key() {
        let err = Gateway::builder()
            .api_key("   ")
            .transport(Arc::new(CannedTransport::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
        assert!(Gateway::builder().build().is_err());
    }

    #[test]
    fn test_build_rejects_bad_base_url() {
        let err = Gateway::builder()
            .api_key("k")
            .base_url("not a url")
            .transport(Arc::new(CannedTransport::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[tokio::test]
    async fn test_success_is_billed_and_logged() {
        let (gw, transport) = gateway(
            CannedTransport::new().respond("/v1/domain/keywords", json!({"keywords": [1, 2, 3]})),
            true,
        );

        let body = gw
            .get("/v1/domain/keywords", json!({"domain": "a.com", "limit": 500}))
            .await
            .unwrap();
        assert_eq!(body["keywords"].as_array().map(Vec::len), Some(3));

        assert_eq!(gw.total_credits(), 30);
        assert_eq!(gw.call_count(), 1);
        let log = gw.call_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].endpoint, "/v1/domain/keywords");
        assert_eq!(log[0].method, HttpMethod::Get);
        assert_eq!(log[0].records, 3);
        assert_eq!(log[0].credits, 30);
        assert_eq!(log[0].params, json!({"domain": "a.com", "limit": 500}));

        let sent = transport.requests();
        assert_eq!(sent[0].auth_token, "test-key");
        assert_eq!(sent[0].base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_logging_disabled_still_counts_credits() {
        let (gw, _) = gateway(
            CannedTransport::new().respond("/v1/backlinks/summary", json!({"backlinks": 10})),
            false,
        );
        gw.get("/v1/backlinks/summary", json!({"target": "a.com"}))
            .await
            .unwrap();
        assert!(gw.call_log().is_empty());
        assert_eq!(gw.total_credits(), 100);
        assert_eq!(gw.diagnostics().call_count, 1);
    }

    #[tokio::test]
    async fn test_error_classification() {
        let (gw, _) = gateway(
            CannedTransport::new()
                .respond_status("/limited", 429, json!({"error": "slow down"}))
                .respond_status("/broke", 402, json!(null))
                .respond_status("/boom", 500, json!("oops"))
                .fail("/down", "connection refused"),
            true,
        );

        assert!(matches!(
            gw.get("/limited", Value::Null).await,
            Err(GatewayError::RateLimitExceeded)
        ));
        assert!(matches!(
            gw.get("/broke", Value::Null).await,
            Err(GatewayError::InsufficientCredits)
        ));
        match gw.get("/boom", Value::Null).await {
            Err(GatewayError::Provider { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            gw.get("/down", Value::Null).await,
            Err(GatewayError::Transport(_))
        ));

        assert!(gw.call_log().is_empty());
        assert_eq!(gw.total_credits(), 0);
        assert_eq!(gw.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_object_params_rejected() {
        let (gw, transport) = gateway(CannedTransport::new(), true);
        let err = gw.get("/v1/domain/ads", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_method() {
        let (gw, transport) = gateway(
            CannedTransport::new().respond("/v1/ai-search/prompts", json!({"prompts": []})),
            true,
        );
        gw.post("/v1/ai-search/prompts", json!({"engine": "chatgpt"}))
            .await
            .unwrap();
        assert_eq!(transport.requests()[0].method, HttpMethod::Post);
        assert_eq!(gw.total_credits(), 0);
    }

    #[tokio::test]
    async fn test_notes_flow_into_diagnostics() {
        let (gw, _) = gateway(CannedTransport::new(), true);
        gw.record_note("backlinks summary: Provider error 500: ");
        assert_eq!(gw.diagnostics().notes.len(), 1);
    }
}
