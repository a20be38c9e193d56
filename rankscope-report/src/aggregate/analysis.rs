//! Top-level competitor analysis.

use futures::future::join_all;
use rankscope_core::{
    AggregatedBacklinkGap, AggregatedKeywordGap, AggregatedKeywordOverlap, CompetitorAnalysis,
    CompetitorAnalysisSummary, ReferringDomain,
};
use rankscope_fetch::{Gateway, or_default};
use rankscope_metrics::{BacklinksFetcher, KeywordsFetcher};
use tracing::{debug, instrument};

use super::backlink_gap::{CompetitorReferringDomains, aggregate_backlink_gaps};
use super::keyword_gap::{CompetitorKeywords, aggregate_keyword_gaps};
use super::keyword_overlap::aggregate_keyword_overlaps;

/// Assumed click-through rate for a top-10 ranking.
pub const TRAFFIC_CTR: f64 = 0.1;

/// Result-size limits for a competitor analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitorLimits {
    /// Keyword gaps requested per competitor and kept overall.
    pub gap_limit: usize,
    /// Common keywords requested per competitor; overlaps kept overall.
    pub overlap_limit: usize,
    /// Backlink gaps kept overall.
    pub backlink_gap_limit: usize,
    /// Referring domains requested per competitor.
    pub referring_domain_limit: usize,
}

/// Estimated monthly visits from gaps shared by at least two competitors.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn traffic_opportunity(gaps: &[AggregatedKeywordGap]) -> u64 {
    gaps.iter()
        .filter(|g| g.competitor_count >= 2)
        .map(|g| (g.volume as f64 * TRAFFIC_CTR).round() as u64)
        .sum()
}

/// Bundles aggregated lists with their summary counts.
///
/// Counts are taken over the lists as given (after truncation).
pub fn summarize(
    competitors: Vec<String>,
    keyword_gaps: Vec<AggregatedKeywordGap>,
    keyword_overlaps: Vec<AggregatedKeywordOverlap>,
    backlink_gaps: Vec<AggregatedBacklinkGap>,
) -> CompetitorAnalysis {
    let summary = CompetitorAnalysisSummary {
        keyword_gaps: keyword_gaps.len(),
        shared_keyword_gaps: keyword_gaps.iter().filter(|g| g.competitor_count >= 2).count(),
        keyword_overlaps: keyword_overlaps.len(),
        shared_keyword_overlaps: keyword_overlaps
            .iter()
            .filter(|o| o.competitor_count >= 2)
            .count(),
        backlink_gaps: backlink_gaps.len(),
        shared_backlink_gaps: backlink_gaps.iter().filter(|g| g.competitor_count >= 2).count(),
        traffic_opportunity: traffic_opportunity(&keyword_gaps),
    };

    CompetitorAnalysis {
        competitors,
        keyword_gaps,
        keyword_overlaps,
        backlink_gaps,
        summary,
    }
}

/// Fetches every competitor's result sets concurrently and aggregates them.
///
/// Each fetch degrades to an empty set on failure, so one unreachable
/// competitor never sinks the analysis. `ours` is the target's own
/// referring-domain list.
#[instrument(skip(gateway, competitors, ours, limits), fields(competitors = competitors.len()))]
pub async fn analyze_competitors(
    gateway: &Gateway,
    target: &str,
    market: &str,
    competitors: &[String],
    ours: &[ReferringDomain],
    limits: &CompetitorLimits,
) -> CompetitorAnalysis {
    let keywords = KeywordsFetcher::new(gateway);
    let backlinks = BacklinksFetcher::new(gateway);

    let per_competitor = competitors.iter().map(|competitor| async move {
        let gap_label = format!("keyword gaps ({competitor})");
        let common_label = format!("keyword overlaps ({competitor})");
        let refdomain_label = format!("referring domains ({competitor})");

        let (gaps, common, domains) = tokio::join!(
            or_default(
                gateway,
                &gap_label,
                keywords.gaps(target, competitor, market, limits.gap_limit),
            ),
            or_default(
                gateway,
                &common_label,
                keywords.common(target, competitor, market, limits.overlap_limit),
            ),
            or_default(
                gateway,
                &refdomain_label,
                backlinks.referring_domains(competitor, limits.referring_domain_limit),
            ),
        );

        debug!(
            competitor = %competitor,
            gaps = gaps.len(),
            common = common.len(),
            referring_domains = domains.len(),
            "Fetched competitor result sets"
        );

        (
            CompetitorKeywords::new(competitor.clone(), gaps),
            CompetitorKeywords::new(competitor.clone(), common),
            CompetitorReferringDomains::new(competitor.clone(), domains),
        )
    });

    let mut gap_sets = Vec::with_capacity(competitors.len());
    let mut common_sets = Vec::with_capacity(competitors.len());
    let mut domain_sets = Vec::with_capacity(competitors.len());
    for (gaps, common, domains) in join_all(per_competitor).await {
        gap_sets.push(gaps);
        common_sets.push(common);
        domain_sets.push(domains);
    }

    summarize(
        competitors.to_vec(),
        aggregate_keyword_gaps(&gap_sets, limits.gap_limit),
        aggregate_keyword_overlaps(&common_sets, limits.overlap_limit),
        aggregate_backlink_gaps(ours, &domain_sets, limits.backlink_gap_limit),
    )
}
