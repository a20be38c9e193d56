//! Report compilation.
//!
//! A pure function from resolved metrics to the final [`Report`]. No I/O
//! happens here; the orchestrator hands over everything it fetched.

use chrono::{DateTime, Utc};
use rankscope_core::{
    AdsSummary, AiPrompt, AiSearchSection, Anchor, AuthorityDistribution, Backlink,
    BacklinksSection, BacklinksSummary, Competitor, CompetitorAnalysis, CompetitorsSection,
    Diagnostics, DistributionSource, DomainOverview, ExecutiveSummary, KeywordsSection,
    LeaderboardEntry, OverviewSection, PositionDistribution, QuickWin, QuickWinKind,
    RankedKeyword, ReferringDomain, Report, WorldwideOverview,
};

/// Share of a near-page-one keyword's volume expected once it reaches
/// page one.
pub const NEAR_PAGE_ONE_CTR: f64 = 0.15;

/// Everything the compiler needs.
#[derive(Debug, Clone, Default)]
pub struct CompilerInput {
    /// Report identifier.
    pub id: String,
    /// Target domain.
    pub domain: String,
    /// Brand name.
    pub brand: String,
    /// Market analysed.
    pub market: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Per-country breakdown.
    pub worldwide: WorldwideOverview,
    /// Single-market overview.
    pub market_overview: DomainOverview,
    /// Ranked keywords in the market.
    pub keywords: Vec<RankedKeyword>,
    /// Backlink headline counts.
    pub backlinks_summary: BacklinksSummary,
    /// Authority distribution.
    pub authority: AuthorityDistribution,
    /// Our referring domains.
    pub referring_domains: Vec<ReferringDomain>,
    /// Anchor texts.
    pub anchors: Vec<Anchor>,
    /// Top backlinks.
    pub top_backlinks: Vec<Backlink>,
    /// Discovered organic competitors.
    pub discovered_competitors: Vec<Competitor>,
    /// Multi-competitor analysis.
    pub analysis: CompetitorAnalysis,
    /// AI engines queried.
    pub engines: Vec<String>,
    /// Deduplicated prompts.
    pub prompts: Vec<AiPrompt>,
    /// Share-of-voice leaderboard.
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Paid ads.
    pub ads: AdsSummary,
    /// Gateway diagnostics.
    pub diagnostics: Diagnostics,
}

/// Builds the report.
pub fn compile(input: CompilerInput) -> Report {
    let (distribution, distribution_source) =
        position_distribution(input.market_overview.positions, &input.keywords);
    let quick_wins = quick_wins(&input.keywords, &input.analysis);
    let summary = executive_summary(&input);

    let total = if input.market_overview.organic.keywords > 0 {
        input.market_overview.organic.keywords
    } else {
        input.keywords.len() as u64
    };

    Report {
        id: input.id,
        domain: input.domain,
        brand: input.brand,
        market: input.market,
        generated_at: input.generated_at,
        overview: OverviewSection {
            market: input.market_overview,
            worldwide: input.worldwide,
        },
        keywords: KeywordsSection {
            total,
            distribution,
            distribution_source,
            keywords: input.keywords,
        },
        backlinks: BacklinksSection {
            summary: input.backlinks_summary,
            authority: input.authority,
            referring_domains: input.referring_domains,
            anchors: input.anchors,
            top_backlinks: input.top_backlinks,
        },
        competitors: CompetitorsSection {
            discovered: input.discovered_competitors,
            analysis: input.analysis,
        },
        ai_search: AiSearchSection {
            engines: input.engines,
            prompts: input.prompts,
            leaderboard: input.leaderboard,
        },
        ads: input.ads,
        quick_wins,
        summary,
        diagnostics: input.diagnostics,
    }
}

/// Provider top-N counts when present and non-empty, otherwise counts
/// derived from the fetched keywords.
pub fn position_distribution(
    provided: Option<PositionDistribution>,
    keywords: &[RankedKeyword],
) -> (PositionDistribution, DistributionSource) {
    match provided {
        Some(distribution) if !distribution.is_empty() => {
            (distribution, DistributionSource::Provider)
        }
        _ => (
            PositionDistribution::from_positions(keywords.iter().map(|k| k.position)),
            DistributionSource::Derived,
        ),
    }
}

/// Quick-win opportunities.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn quick_wins(keywords: &[RankedKeyword], analysis: &CompetitorAnalysis) -> Vec<QuickWin> {
    let mut wins = Vec::new();

    let near: Vec<&RankedKeyword> = keywords.iter().filter(|k| k.is_near_page_one()).collect();
    if !near.is_empty() {
        let estimated: f64 = near.iter().map(|k| k.volume as f64 * NEAR_PAGE_ONE_CTR).sum();
        wins.push(QuickWin {
            kind: QuickWinKind::NearPageOne,
            title: "Push page-two keywords onto page one".to_string(),
            description: format!(
                "{} keywords rank in positions 11-20 and need a small push to reach page one.",
                near.len()
            ),
            keyword_count: near.len(),
            estimated_traffic: estimated.round() as u64,
        });
    }

    let gaps = &analysis.keyword_gaps;
    if !gaps.is_empty() {
        wins.push(QuickWin {
            kind: QuickWinKind::ContentGap,
            title: "Cover keywords your competitors rank for".to_string(),
            description: format!(
                "{} keywords bring competitors traffic while you do not rank at all.",
                gaps.len()
            ),
            keyword_count: gaps.len(),
            estimated_traffic: gaps.iter().map(|g| g.volume).sum(),
        });
    }

    wins
}

/// The target's share of voice in AI answers, 0 when it is not on the
/// leaderboard.
pub fn ai_share_of_voice(leaderboard: &[LeaderboardEntry]) -> f64 {
    leaderboard
        .iter()
        .find(|entry| entry.is_primary)
        .map_or(0.0, |entry| entry.share_of_voice)
}

fn executive_summary(input: &CompilerInput) -> ExecutiveSummary {
    let overview = &input.market_overview;
    ExecutiveSummary {
        market: input.market.clone(),
        organic_traffic: overview.organic.traffic,
        organic_keywords: overview.organic.keywords,
        paid_traffic: overview.paid.traffic,
        backlinks: input.backlinks_summary.backlinks,
        referring_domains: input.backlinks_summary.refdomains,
        domain_inlink_rank: input.backlinks_summary.domain_inlink_rank,
        ai_share_of_voice: ai_share_of_voice(&input.leaderboard),
        keyword_gaps: input.analysis.summary.keyword_gaps,
        backlink_gaps: input.analysis.summary.backlink_gaps,
        traffic_opportunity: input.analysis.summary.traffic_opportunity,
        position_changes: input.worldwide.changes,
    }
}
