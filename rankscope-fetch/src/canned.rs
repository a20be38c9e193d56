//! A transport that answers from a fixed route table.
//!
//! Used by tests across the workspace and for offline dry runs. Routes are
//! matched on the exact path plus an optional set of parameters that must
//! all be present with equal values. The route with the most matching
//! parameters wins; unmatched requests get a 404.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HttpError;
use crate::transport::{ApiRequest, Params, Transport, TransportResponse};

#[derive(Debug, Clone)]
enum Outcome {
    Respond(TransportResponse),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    params: Params,
    outcome: Outcome,
}

impl Route {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.path == request.path
            && self
                .params
                .iter()
                .all(|(k, v)| request.params.get(k) == Some(v))
    }
}

/// Canned-response transport.
#[derive(Debug, Default)]
pub struct CannedTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl CannedTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with HTTP 200 and `body`.
    pub fn respond(self, path: &str, body: Value) -> Self {
        self.respond_status(path, 200, body)
    }

    /// Answers `path` with `status` and `body`.
    pub fn respond_status(self, path: &str, status: u16, body: Value) -> Self {
        self.route(path, Value::Null, Outcome::Respond(TransportResponse { status, body }))
    }

    /// Answers `path` with HTTP 200 and `body` when the request carries
    /// every parameter in `params`.
    pub fn respond_when(self, path: &str, params: Value, body: Value) -> Self {
        self.route(
            path,
            params,
            Outcome::Respond(TransportResponse { status: 200, body }),
        )
    }

    /// Answers `path` with `status` when the request carries every
    /// parameter in `params`.
    pub fn respond_status_when(self, path: &str, params: Value, status: u16, body: Value) -> Self {
        self.route(path, params, Outcome::Respond(TransportResponse { status, body }))
    }

    /// Fails `path` at the transport level.
    pub fn fail(self, path: &str, message: &str) -> Self {
        self.route(path, Value::Null, Outcome::Fail(message.to_string()))
    }

    fn route(mut self, path: &str, params: Value, outcome: Outcome) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Params::new(),
        };
        self.routes.push(Route {
            path: path.to_string(),
            params,
            outcome,
        });
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn perform(&self, request: &ApiRequest) -> Result<TransportResponse, HttpError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let best = self
            .routes
            .iter()
            .filter(|route| route.matches(request))
            .fold(None, |best: Option<&Route>, route| match best {
                Some(b) if b.params.len() >= route.params.len() => Some(b),
                _ => Some(route),
            });

        match best.map(|route| &route.outcome) {
            Some(Outcome::Respond(response)) => Ok(response.clone()),
            Some(Outcome::Fail(message)) => Err(HttpError::Connection(message.clone())),
            None => Ok(TransportResponse {
                status: 404,
                body: Value::String(format!("no route for {}", request.path)),
            }),
        }
    }
}
