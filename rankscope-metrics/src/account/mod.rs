//! Account normalizer.
//!
//! Endpoint: `/v1/account/balance`. Free of charge.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::AccountFetcher;
pub use parser::{AccountBalance, parse_balance};
