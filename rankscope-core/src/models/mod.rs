//! Domain models for `RankScope`.
//!
//! ## Submodules
//!
//! - [`backlinks`] - Backlink summary, authority distribution, lists
//! - [`overview`] - Market/worldwide overview, competitors, position distribution
//! - [`keywords`] - Ranked and compared keywords
//! - [`ai_search`] - AI prompts and leaderboard
//! - [`ads`] - Paid search
//! - [`aggregate`] - Cross-competitor aggregates
//! - [`report`] - The compiled report and its lifecycle
//! - [`call_log`] - Provider call diagnostics

pub mod ads;
pub mod aggregate;
pub mod ai_search;
pub mod backlinks;
pub mod call_log;
pub mod keywords;
pub mod overview;
pub mod report;

// Re-export everything at the models level
pub use ads::{AdsSummary, PaidAd};
pub use aggregate::{
    AggregatedBacklinkGap, AggregatedKeywordGap, AggregatedKeywordOverlap, CompetitorAnalysis,
    CompetitorAnalysisSummary, CompetitorBacklinks, CompetitorPosition,
};
pub use ai_search::{AiPrompt, LeaderboardEntry, PromptClassification};
pub use backlinks::{
    AUTHORITY_BUCKETS, Anchor, AuthorityBucket, AuthorityDistribution, Backlink,
    BacklinksSummary, ReferringDomain,
};
pub use call_log::{CallLogEntry, HttpMethod};
pub use keywords::{ComparedKeyword, RankedKeyword};
pub use overview::{
    Competitor, CountryMetrics, DomainOverview, PositionChanges, PositionDistribution,
    TrafficMetrics, WorldwideOverview,
};
pub use report::{
    AiSearchSection, BacklinksSection, CompetitorsSection, Diagnostics, DistributionSource,
    ExecutiveSummary, KeywordsSection, OverviewSection, QuickWin, QuickWinKind, Report,
    ReportStatus, StoredReport,
};
#[cfg(test)]
mod serde_tests;
