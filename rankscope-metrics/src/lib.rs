// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # RankScope Metrics
//!
//! One normalizer per provider endpoint family. Each module pairs a
//! **parser** (raw JSON to core model, infallible, zero/empty defaults)
//! with a **fetcher** (request construction and paging, through the
//! gateway).
//!
//! | Module | Endpoints | Output |
//! |--------|-----------|--------|
//! | [`backlinks`] | summary, authority, refdomains, anchors, top | `BacklinksSummary`, `AuthorityDistribution`, lists |
//! | [`overview`] | worldwide, overview, competitors | `WorldwideOverview`, `DomainOverview`, `Competitor` |
//! | [`keywords`] | keywords (paged), comparison | `RankedKeyword`, `ComparedKeyword` |
//! | [`ai_search`] | prompts, leaderboard | `AiPrompt`, `LeaderboardEntry` |
//! | [`ads`] | ads | `AdsSummary` |
//! | [`account`] | balance | `AccountBalance` |
//!
//! Fetchers return the gateway's error unchanged; callers decide whether a
//! failure degrades to the default (see `rankscope_fetch::with_default`).
//!
//! ## Usage
//!
//! ```ignore
//! use rankscope_metrics::BacklinksFetcher;
//!
//! let summary = BacklinksFetcher::new(&gateway).summary("example.com").await?;
//! ```

pub mod lenient;
mod normalize;

// Endpoint families (alphabetical)
pub mod account;
pub mod ads;
pub mod ai_search;
pub mod backlinks;
pub mod keywords;
pub mod overview;

// Re-export fetchers
pub use account::{AccountBalance, AccountFetcher};
pub use ads::AdsFetcher;
pub use ai_search::{AiSearchFetcher, PromptScope};
pub use backlinks::BacklinksFetcher;
pub use keywords::KeywordsFetcher;
pub use overview::OverviewFetcher;

#[cfg(test)]
mod parser_edge_tests;
