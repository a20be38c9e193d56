//! AI search visibility normalizers.
//!
//! Endpoints: `/v1/ai-search/prompts` (queried by brand or by target
//! domain) and `/v1/ai-search/leaderboard`.

mod fetcher;
pub(crate) mod parser;

pub use fetcher::{AiSearchFetcher, PromptScope};
pub use parser::{parse_leaderboard, parse_prompts};
