// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # RankScope Fetch
//!
//! The provider gateway for RankScope.
//!
//! Every request to the analytics provider goes through a [`Gateway`]:
//!
//! - [`rate_limit::TokenBucket`] - admission control (burst, then paced)
//! - [`credits::CreditCostTable`] - per-endpoint credit pricing
//! - [`transport::Transport`] - the network seam, implemented by
//!   [`host::http::HttpClient`] and [`canned::CannedTransport`]
//! - [`fallback::with_default`] - turns a failed fetch into a default value
//!
//! ## Example
//!
//! ```ignore
//! use rankscope_fetch::Gateway;
//!
//! let gateway = Gateway::builder().api_key(key).build()?;
//! let body = gateway
//!     .get("/v1/backlinks/summary", serde_json::json!({"target": "example.com"}))
//!     .await?;
//! println!("credits so far: {}", gateway.total_credits());
//! ```

pub mod canned;
pub mod credits;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod host;
pub mod rate_limit;
pub mod transport;

// Errors
pub use error::{GatewayError, HttpError};

// Gateway
pub use credits::{CreditCost, CreditCostEntry, CreditCostTable, count_records};
pub use fallback::{or_default, with_default};
pub use gateway::{DEFAULT_BASE_URL, Gateway, GatewayBuilder, GatewayConfig};
pub use rate_limit::{RateLimitConfig, TokenBucket};

// Transport
pub use canned::CannedTransport;
pub use host::http::HttpClient;
pub use transport::{ApiRequest, Params, Transport, TransportResponse};
