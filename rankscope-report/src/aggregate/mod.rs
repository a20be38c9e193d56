//! Multi-competitor aggregation.
//!
//! Each aggregator folds one result set per competitor into a single list
//! keyed by the natural entity (keyword or referring domain):
//!
//! 1. fold competitor sets in request order into an insertion-ordered map
//! 2. keep the maximal scalar values seen across duplicates
//! 3. sort by competitor count, then the aggregator's scalar, both
//!    descending (stable, so ties keep fold order)
//! 4. truncate to the caller's limit
//!
//! The folds are pure and deterministic: the same input always produces
//! the same output, in the same order.

mod analysis;
mod backlink_gap;
mod keyword_gap;
mod keyword_overlap;

pub use analysis::{
    CompetitorLimits, TRAFFIC_CTR, analyze_competitors, summarize, traffic_opportunity,
};
pub use backlink_gap::{CompetitorReferringDomains, aggregate_backlink_gaps};
pub use keyword_gap::{CompetitorKeywords, aggregate_keyword_gaps};
pub use keyword_overlap::aggregate_keyword_overlaps;

/// Rounded mean of a non-empty list of positions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub(crate) fn mean_position(positions: &[u32]) -> u32 {
    if positions.is_empty() {
        return 0;
    }
    let sum: u64 = positions.iter().map(|&p| u64::from(p)).sum();
    (sum as f64 / positions.len() as f64).round() as u32
}
