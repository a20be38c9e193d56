//! Paid search normalizer.
//!
//! Endpoint: `/v1/domain/ads`.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::AdsFetcher;
pub use parser::parse_ads;
