//! Host APIs for the provider gateway.
//!
//! - [`http`] - HTTP transport with tracing and domain allowlist

pub mod http;

pub use http::HttpClient;
