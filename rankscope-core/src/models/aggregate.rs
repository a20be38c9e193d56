//! Cross-competitor aggregate records.
//!
//! These are plain values produced by the aggregators in `rankscope-report`.
//! They hold no references back to raw provider payloads.

use serde::{Deserialize, Serialize};

/// A competitor and its position for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorPosition {
    /// Competitor domain.
    pub domain: String,
    /// Competitor position.
    pub position: u32,
}

/// A keyword one or more competitors rank for and we do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedKeywordGap {
    /// Keyword (unique key).
    pub keyword: String,
    /// Highest volume seen.
    pub volume: u64,
    /// Highest difficulty seen.
    pub difficulty: u32,
    /// Always equal to `competitors.len()`.
    pub competitor_count: usize,
    /// Contributing competitors in fold order.
    pub competitors: Vec<CompetitorPosition>,
    /// Rounded mean competitor position.
    pub avg_position: u32,
    /// Best (lowest) competitor position.
    pub best_position: u32,
}

/// A keyword we rank for where at least one competitor outranks us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedKeywordOverlap {
    /// Keyword (unique key).
    pub keyword: String,
    /// Highest volume seen.
    pub volume: u64,
    /// Highest difficulty seen.
    pub difficulty: u32,
    /// Our position.
    pub our_position: u32,
    /// Always equal to `competitors.len()`.
    pub competitor_count: usize,
    /// Competitors strictly ahead of us.
    pub competitors: Vec<CompetitorPosition>,
    /// Rounded mean competitor position.
    pub avg_competitor_position: u32,
    /// Best (lowest) competitor position.
    pub best_competitor_position: u32,
    /// `our_position - avg_competitor_position`; positive means we trail.
    pub position_gap: i64,
}

/// Backlinks a competitor receives from one referring domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorBacklinks {
    /// Competitor domain.
    pub domain: String,
    /// Backlinks from the referring domain to the competitor.
    pub backlinks: u64,
}

/// A referring domain that links to competitors but not to us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedBacklinkGap {
    /// Referring domain (unique key).
    pub domain: String,
    /// Highest authority score seen.
    pub domain_authority_score: u32,
    /// Always equal to `competitors.len()`.
    pub competitor_count: usize,
    /// Sum of backlinks across competitors.
    pub total_backlinks_to_competitors: u64,
    /// Contributing competitors in fold order.
    pub competitors: Vec<CompetitorBacklinks>,
}

/// Headline counts for a multi-competitor analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorAnalysisSummary {
    /// Keyword gaps returned.
    pub keyword_gaps: usize,
    /// Keyword gaps reached by two or more competitors.
    pub shared_keyword_gaps: usize,
    /// Keyword overlaps returned.
    pub keyword_overlaps: usize,
    /// Keyword overlaps with two or more competitors ahead.
    pub shared_keyword_overlaps: usize,
    /// Backlink gaps returned.
    pub backlink_gaps: usize,
    /// Backlink gaps linking to two or more competitors.
    pub shared_backlink_gaps: usize,
    /// Estimated monthly visits from shared keyword gaps.
    pub traffic_opportunity: u64,
}

/// Keyword and backlink gaps against a set of competitors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorAnalysis {
    /// Competitors analysed, in request order.
    pub competitors: Vec<String>,
    /// Keyword gaps, sorted and truncated.
    pub keyword_gaps: Vec<AggregatedKeywordGap>,
    /// Keyword overlaps, sorted and truncated.
    pub keyword_overlaps: Vec<AggregatedKeywordOverlap>,
    /// Backlink gaps, sorted and truncated.
    pub backlink_gaps: Vec<AggregatedBacklinkGap>,
    /// Headline counts.
    pub summary: CompetitorAnalysisSummary,
}
