//! Report run configuration.

use chrono::Duration;

/// AI engines queried by default.
pub const DEFAULT_AI_ENGINES: &[&str] = &["chatgpt", "perplexity", "gemini", "ai_overview"];

/// Limits and defaults for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Market used when the worldwide breakdown is empty.
    pub default_market: String,
    /// Competitors analysed when none are named.
    pub max_competitors: usize,
    /// Competitor candidates requested during discovery.
    pub competitor_candidates: usize,
    /// Ranked keywords fetched for the target.
    pub ranked_keyword_limit: usize,
    /// Keyword gaps kept after aggregation (also requested per competitor).
    pub gap_limit: usize,
    /// Keyword overlaps kept after aggregation (also requested per competitor).
    pub overlap_limit: usize,
    /// Backlink gaps kept after aggregation.
    pub backlink_gap_limit: usize,
    /// Referring domains fetched for the target and for each competitor.
    pub referring_domain_limit: usize,
    /// Upper bound on the target's referring domains fetched to exclude
    /// from backlink gaps.
    pub exclusion_domain_limit: usize,
    /// Anchor texts fetched.
    pub anchor_limit: usize,
    /// Top backlinks fetched.
    pub top_backlink_limit: usize,
    /// Paid ads fetched.
    pub ads_limit: usize,
    /// Prompts kept per AI engine.
    pub prompts_per_engine: usize,
    /// AI engines queried, in report order.
    pub ai_engines: Vec<String>,
    /// How long a finished record is served.
    pub report_ttl: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_market: "us".to_string(),
            max_competitors: 3,
            competitor_candidates: 10,
            ranked_keyword_limit: 1000,
            gap_limit: 100,
            overlap_limit: 100,
            backlink_gap_limit: 100,
            referring_domain_limit: 500,
            exclusion_domain_limit: 10_000,
            anchor_limit: 50,
            top_backlink_limit: 50,
            ads_limit: 100,
            prompts_per_engine: 10,
            ai_engines: DEFAULT_AI_ENGINES.iter().map(ToString::to_string).collect(),
            report_ttl: Duration::hours(168),
        }
    }
}
