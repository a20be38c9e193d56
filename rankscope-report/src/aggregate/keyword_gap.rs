//! Keyword gap aggregation.

use std::collections::HashMap;

use rankscope_core::{AggregatedKeywordGap, ComparedKeyword, CompetitorPosition};

use super::mean_position;

/// One competitor's keyword comparison rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitorKeywords {
    /// Competitor domain.
    pub competitor: String,
    /// Comparison rows (`position` is the competitor's rank,
    /// `compare_position` ours).
    pub keywords: Vec<ComparedKeyword>,
}

impl CompetitorKeywords {
    /// Creates a set.
    pub fn new(competitor: impl Into<String>, keywords: Vec<ComparedKeyword>) -> Self {
        Self {
            competitor: competitor.into(),
            keywords,
        }
    }
}

/// Merges per-competitor gap listings.
///
/// Only strict gaps are admitted: the competitor ranks (position above 0)
/// and we do not (our position 0). A competitor contributes at most once
/// per keyword. On duplicates volume and difficulty take the maximum.
pub fn aggregate_keyword_gaps(
    sets: &[CompetitorKeywords],
    limit: usize,
) -> Vec<AggregatedKeywordGap> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut gaps: Vec<AggregatedKeywordGap> = Vec::new();

    for set in sets {
        for row in &set.keywords {
            if row.position == 0 || row.compare_position != 0 {
                continue;
            }
            let competitor = CompetitorPosition {
                domain: set.competitor.clone(),
                position: row.position,
            };

            match index.get(row.keyword.as_str()) {
                Some(&i) => {
                    let gap = &mut gaps[i];
                    if gap.competitors.iter().any(|c| c.domain == set.competitor) {
                        continue;
                    }
                    gap.volume = gap.volume.max(row.volume);
                    gap.difficulty = gap.difficulty.max(row.difficulty);
                    gap.competitors.push(competitor);
                }
                None => {
                    index.insert(row.keyword.as_str(), gaps.len());
                    gaps.push(AggregatedKeywordGap {
                        keyword: row.keyword.clone(),
                        volume: row.volume,
                        difficulty: row.difficulty,
                        competitor_count: 0,
                        competitors: vec![competitor],
                        avg_position: 0,
                        best_position: 0,
                    });
                }
            }
        }
    }

    for gap in &mut gaps {
        let positions: Vec<u32> = gap.competitors.iter().map(|c| c.position).collect();
        gap.competitor_count = positions.len();
        gap.avg_position = mean_position(&positions);
        gap.best_position = positions.iter().copied().min().unwrap_or(0);
    }

    gaps.sort_by(|a, b| {
        b.competitor_count
            .cmp(&a.competitor_count)
            .then(b.volume.cmp(&a.volume))
    });
    gaps.truncate(limit);
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keyword: &str, volume: u64, difficulty: u32, position: u32) -> ComparedKeyword {
        ComparedKeyword {
            keyword: keyword.to_string(),
            volume,
            difficulty,
            position,
            compare_position: 0,
        }
    }

    #[test]
    fn test_merges_duplicate_keyword() {
        let sets = vec![
            CompetitorKeywords::new("a.com", vec![row("buy shoes", 1000, 30, 5)]),
            CompetitorKeywords::new("b.com", vec![row("buy shoes", 1200, 35, 2)]),
        ];
        let gaps = aggregate_keyword_gaps(&sets, 10);

        assert_eq!(gaps.len(), 1);
        let gap = &gaps[0];
        assert_eq!(gap.keyword, "buy shoes");
        assert_eq!(gap.volume, 1200);
        assert_eq!(gap.difficulty, 35);
        assert_eq!(gap.competitor_count, 2);
        assert_eq!(gap.competitors.len(), gap.competitor_count);
        assert_eq!(gap.avg_position, 4);
        assert_eq!(gap.best_position, 2);
    }

    #[test]
    fn test_sort_by_count_then_volume() {
        let sets = vec![
            CompetitorKeywords::new(
                "a.com",
                vec![row("small", 10, 1, 1), row("shared", 50, 1, 3), row("big", 9000, 1, 2)],
            ),
            CompetitorKeywords::new("b.com", vec![row("shared", 40, 1, 4), row("mid", 500, 1, 1)]),
        ];
        let gaps = aggregate_keyword_gaps(&sets, 10);
        let order: Vec<&str> = gaps.iter().map(|g| g.keyword.as_str()).collect();
        assert_eq!(order, vec!["shared", "big", "mid", "small"]);
    }

    #[test]
    fn test_ties_keep_fold_order_and_truncate() {
        let sets = vec![
            CompetitorKeywords::new("a.com", vec![row("first", 100, 1, 1), row("second", 100, 1, 1)]),
            CompetitorKeywords::new("b.com", vec![row("third", 100, 1, 1)]),
        ];
        let gaps = aggregate_keyword_gaps(&sets, 2);
        let order: Vec<&str> = gaps.iter().map(|g| g.keyword.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_rejects_non_gaps_and_repeat_competitor() {
        let mut ours = row("we rank", 100, 1, 3);
        ours.compare_position = 8;
        let sets = vec![CompetitorKeywords::new(
            "a.com",
            vec![ours, row("unranked", 100, 1, 0), row("dup", 10, 1, 4), row("dup", 20, 1, 2)],
        )];
        let gaps = aggregate_keyword_gaps(&sets, 10);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].keyword, "dup");
        assert_eq!(gaps[0].competitor_count, 1);
        assert_eq!(gaps[0].best_position, 4);
    }

    #[test]
    fn test_idempotent() {
        let sets = vec![
            CompetitorKeywords::new("a.com", vec![row("x", 5, 1, 3), row("y", 5, 1, 1)]),
            CompetitorKeywords::new("b.com", vec![row("y", 7, 2, 9), row("z", 5, 1, 2)]),
        ];
        assert_eq!(aggregate_keyword_gaps(&sets, 10), aggregate_keyword_gaps(&sets, 10));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_keyword_gaps(&[], 10).is_empty());
        assert!(aggregate_keyword_gaps(&[CompetitorKeywords::new("a.com", vec![row("k", 1, 1, 1)])], 0).is_empty());
    }
}
