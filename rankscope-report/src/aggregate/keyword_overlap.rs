//! Keyword overlap aggregation.

use std::collections::HashMap;

use rankscope_core::{AggregatedKeywordOverlap, CompetitorPosition};

use super::keyword_gap::CompetitorKeywords;
use super::mean_position;

/// Merges per-competitor common-keyword listings, keeping only competitors
/// that outrank us.
///
/// A row is admitted only when both sides rank and the competitor's
/// position is strictly lower (better) than ours; other rows are dropped,
/// never merged. The position gap is our position minus the rounded mean
/// competitor position.
pub fn aggregate_keyword_overlaps(
    sets: &[CompetitorKeywords],
    limit: usize,
) -> Vec<AggregatedKeywordOverlap> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut overlaps: Vec<AggregatedKeywordOverlap> = Vec::new();

    for set in sets {
        for row in &set.keywords {
            let ours = row.compare_position;
            if row.position == 0 || ours == 0 || row.position >= ours {
                continue;
            }
            let competitor = CompetitorPosition {
                domain: set.competitor.clone(),
                position: row.position,
            };

            match index.get(row.keyword.as_str()) {
                Some(&i) => {
                    let overlap = &mut overlaps[i];
                    if overlap.competitors.iter().any(|c| c.domain == set.competitor) {
                        continue;
                    }
                    overlap.volume = overlap.volume.max(row.volume);
                    overlap.difficulty = overlap.difficulty.max(row.difficulty);
                    overlap.competitors.push(competitor);
                }
                None => {
                    index.insert(row.keyword.as_str(), overlaps.len());
                    overlaps.push(AggregatedKeywordOverlap {
                        keyword: row.keyword.clone(),
                        volume: row.volume,
                        difficulty: row.difficulty,
                        our_position: ours,
                        competitor_count: 0,
                        competitors: vec![competitor],
                        avg_competitor_position: 0,
                        best_competitor_position: 0,
                        position_gap: 0,
                    });
                }
            }
        }
    }

    for overlap in &mut overlaps {
        let positions: Vec<u32> = overlap.competitors.iter().map(|c| c.position).collect();
        overlap.competitor_count = positions.len();
        overlap.avg_competitor_position = mean_position(&positions);
        overlap.best_competitor_position = positions.iter().copied().min().unwrap_or(0);
        overlap.position_gap =
            i64::from(overlap.our_position) - i64::from(overlap.avg_competitor_position);
    }

    overlaps.sort_by(|a, b| {
        b.competitor_count
            .cmp(&a.competitor_count)
            .then(b.volume.cmp(&a.volume))
    });
    overlaps.truncate(limit);
    overlaps
}
