//! Provider call diagnostics.
//!
//! Every successful gateway call appends one [`CallLogEntry`] to the
//! session's log. The compiled report carries the log so developers can see
//! exactly what was requested and what it cost.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP method used for a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Query-string request.
    #[default]
    Get,
    /// JSON-body request.
    Post,
}

impl HttpMethod {
    /// Returns the wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Endpoint path (e.g. `/v1/backlinks/summary`).
    pub endpoint: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request parameters as sent.
    pub params: serde_json::Value,
    /// Raw response body.
    pub response: serde_json::Value,
    /// When the call started.
    pub timestamp: DateTime<Utc>,
    /// Wall-clock duration of the outbound call in milliseconds.
    pub duration_ms: u64,
    /// Records counted in the response.
    pub records: u64,
    /// Credits charged for the call.
    pub credits: u64,
}
