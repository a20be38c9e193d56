//! Keyword normalizers.
//!
//! Endpoints: `/v1/domain/keywords` (paged) and
//! `/v1/domain/keywords/comparison`.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::{KeywordsFetcher, PAGE_SIZE};
pub use parser::{parse_compared_keywords, parse_ranked_keywords};
