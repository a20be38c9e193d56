//! Backlink profile normalizers.
//!
//! Endpoints: `/v1/backlinks/summary`, `/v1/backlinks/authority`,
//! `/v1/backlinks/refdomains`, `/v1/backlinks/anchors`, `/v1/backlinks/top`.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::BacklinksFetcher;
pub use parser::{
    parse_anchors, parse_authority, parse_referring_domains, parse_summary, parse_top_backlinks,
};
