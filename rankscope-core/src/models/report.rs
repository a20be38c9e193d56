//! The compiled report and its lifecycle.
//!
//! - [`Report`] - Immutable result of one generation run
//! - [`ReportStatus`] - Run state machine (`pending → running → completed | failed`)
//! - [`StoredReport`] - What the persistence collaborator keeps

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AdsSummary, AiPrompt, Anchor, AuthorityDistribution, Backlink, BacklinksSummary,
    CallLogEntry, Competitor, CompetitorAnalysis, DomainOverview, LeaderboardEntry,
    PositionChanges, PositionDistribution, RankedKeyword, ReferringDomain, WorldwideOverview,
};

// ============================================================================
// Sections
// ============================================================================

/// Market and worldwide overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewSection {
    /// Totals for the analysed market.
    pub market: DomainOverview,
    /// Per-country breakdown.
    pub worldwide: WorldwideOverview,
}

/// Where the position distribution came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSource {
    /// Provider-supplied top-N counts.
    Provider,
    /// Counted from the fetched keyword list.
    #[default]
    Derived,
}

/// Organic keyword rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordsSection {
    /// Total organic keywords in the market.
    pub total: u64,
    /// Keyword counts by ranking threshold.
    pub distribution: PositionDistribution,
    /// Origin of `distribution`.
    pub distribution_source: DistributionSource,
    /// Fetched keywords, best position first.
    pub keywords: Vec<RankedKeyword>,
}

/// Backlink profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklinksSection {
    /// Aggregate counts.
    pub summary: BacklinksSummary,
    /// Referring domains by authority range.
    pub authority: AuthorityDistribution,
    /// Strongest referring domains.
    pub referring_domains: Vec<ReferringDomain>,
    /// Most used anchors.
    pub anchors: Vec<Anchor>,
    /// Strongest backlinks.
    pub top_backlinks: Vec<Backlink>,
}

/// Competitor landscape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorsSection {
    /// Competitors discovered by the provider.
    pub discovered: Vec<Competitor>,
    /// Gap analysis against the analysed competitors.
    pub analysis: CompetitorAnalysis,
}

/// AI search visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSearchSection {
    /// Engines queried.
    pub engines: Vec<String>,
    /// Deduplicated prompts, grouped by engine.
    pub prompts: Vec<AiPrompt>,
    /// Share-of-voice leaderboard.
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ============================================================================
// Derived
// ============================================================================

/// Kind of quick-win opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickWinKind {
    /// Keywords ranking 11-20.
    NearPageOne,
    /// Keywords competitors rank for and we do not.
    ContentGap,
}

/// A short, actionable opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWin {
    /// Opportunity kind.
    pub kind: QuickWinKind,
    /// Headline.
    pub title: String,
    /// One-sentence explanation.
    pub description: String,
    /// Keywords involved.
    pub keyword_count: usize,
    /// Estimated monthly visits.
    pub estimated_traffic: u64,
}

/// Headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Market analysed.
    pub market: String,
    /// Organic traffic in the market.
    pub organic_traffic: u64,
    /// Organic keywords in the market.
    pub organic_keywords: u64,
    /// Paid traffic in the market.
    pub paid_traffic: u64,
    /// Total backlinks.
    pub backlinks: u64,
    /// Referring domains.
    pub referring_domains: u64,
    /// Domain authority score.
    pub domain_inlink_rank: u32,
    /// Share of voice of the target in AI answers, percent.
    pub ai_share_of_voice: f64,
    /// Keyword gaps found.
    pub keyword_gaps: usize,
    /// Backlink gaps found.
    pub backlink_gaps: usize,
    /// Estimated monthly visits from shared keyword gaps.
    pub traffic_opportunity: u64,
    /// Global position changes.
    pub position_changes: PositionChanges,
}

/// Developer diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Provider calls, in completion order. Empty when call logging is off.
    pub calls: Vec<CallLogEntry>,
    /// Successful provider calls.
    pub call_count: u64,
    /// Credits charged across the run.
    pub total_credits: u64,
    /// One note per fetch that fell back to its default.
    pub notes: Vec<String>,
}

// ============================================================================
// Report
// ============================================================================

/// The consolidated report for one target domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report identifier.
    pub id: String,
    /// Analysed domain.
    pub domain: String,
    /// Brand name used for AI search queries.
    pub brand: String,
    /// Market analysed.
    pub market: String,
    /// When the report was compiled.
    pub generated_at: DateTime<Utc>,
    /// Overview section.
    pub overview: OverviewSection,
    /// Keyword section.
    pub keywords: KeywordsSection,
    /// Backlink section.
    pub backlinks: BacklinksSection,
    /// Competitor section.
    pub competitors: CompetitorsSection,
    /// AI search section.
    pub ai_search: AiSearchSection,
    /// Paid search section.
    pub ads: AdsSummary,
    /// Quick wins.
    pub quick_wins: Vec<QuickWin>,
    /// Executive summary.
    pub summary: ExecutiveSummary,
    /// Call log, credits and degradation notes.
    pub diagnostics: Diagnostics,
}

// ============================================================================
// Lifecycle
// ============================================================================

/// State of a report generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportStatus {
    /// Not started.
    #[default]
    Pending,
    /// Executing a phase.
    Running {
        /// Current phase (1-based).
        phase: u8,
        /// Number of phases.
        total: u8,
        /// Step description.
        step: String,
    },
    /// Finished with a report.
    Completed,
    /// Finished without a report.
    Failed {
        /// Error message.
        error: String,
    },
}

impl ReportStatus {
    /// Returns true for `completed` and `failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }

    /// Returns true for `failed`.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running { phase, total, step } => {
                write!(f, "running ({phase}/{total}): {step}")
            }
            Self::Completed => f.write_str("completed"),
            Self::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// A report record as kept by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    /// Report identifier.
    pub id: String,
    /// Analysed domain.
    pub domain: String,
    /// Final (or current) run state.
    pub status: ReportStatus,
    /// The report, present when `status` is `completed`.
    pub report: Option<Report>,
    /// When the run was started.
    pub created_at: DateTime<Utc>,
    /// When the record stops being served.
    pub expires_at: DateTime<Utc>,
}

impl StoredReport {
    /// Record for a completed report.
    pub fn completed(report: Report, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: report.id.clone(),
            domain: report.domain.clone(),
            status: ReportStatus::Completed,
            created_at: report.generated_at,
            report: Some(report),
            expires_at,
        }
    }

    /// Record for a failed run.
    pub fn failed(
        id: impl Into<String>,
        domain: impl Into<String>,
        error: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            status: ReportStatus::Failed {
                error: error.into(),
            },
            report: None,
            created_at,
            expires_at,
        }
    }

    /// Returns true once `now` has passed `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
