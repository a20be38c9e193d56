//! Domain overview normalizers.
//!
//! Endpoints: `/v1/domain/overview/worldwide`, `/v1/domain/overview`,
//! `/v1/domain/competitors`.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::OverviewFetcher;
pub use parser::{WORLDWIDE_SOURCE, parse_competitors, parse_market_overview, parse_worldwide};
