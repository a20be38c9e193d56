//! Backlink gap aggregation.

use std::collections::{HashMap, HashSet};

use rankscope_core::{AggregatedBacklinkGap, CompetitorBacklinks, ReferringDomain};

/// One competitor's referring domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitorReferringDomains {
    /// Competitor domain.
    pub competitor: String,
    /// Domains linking to the competitor.
    pub domains: Vec<ReferringDomain>,
}

impl CompetitorReferringDomains {
    /// Creates a set.
    pub fn new(competitor: impl Into<String>, domains: Vec<ReferringDomain>) -> Self {
        Self {
            competitor: competitor.into(),
            domains,
        }
    }
}

/// Referring domains that link to competitors but not to us.
///
/// Domains are compared case-insensitively. Any domain in `ours` is
/// excluded no matter how many competitors it links to. On duplicates the
/// authority score takes the maximum and backlinks accumulate.
pub fn aggregate_backlink_gaps(
    ours: &[ReferringDomain],
    sets: &[CompetitorReferringDomains],
    limit: usize,
) -> Vec<AggregatedBacklinkGap> {
    let ours: HashSet<String> = ours.iter().map(|d| d.domain.to_ascii_lowercase()).collect();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut gaps: Vec<AggregatedBacklinkGap> = Vec::new();

    for set in sets {
        for referrer in &set.domains {
            let key = referrer.domain.to_ascii_lowercase();
            if key.is_empty() || ours.contains(&key) {
                continue;
            }
            let contribution = CompetitorBacklinks {
                domain: set.competitor.clone(),
                backlinks: referrer.backlinks,
            };

            match index.get(&key) {
                Some(&i) => {
                    let gap = &mut gaps[i];
                    if gap.competitors.iter().any(|c| c.domain == set.competitor) {
                        continue;
                    }
                    gap.domain_authority_score =
                        gap.domain_authority_score.max(referrer.domain_inlink_rank);
                    gap.total_backlinks_to_competitors += referrer.backlinks;
                    gap.competitors.push(contribution);
                    gap.competitor_count = gap.competitors.len();
                }
                None => {
                    index.insert(key.clone(), gaps.len());
                    gaps.push(AggregatedBacklinkGap {
                        domain: key,
                        domain_authority_score: referrer.domain_inlink_rank,
                        competitor_count: 1,
                        total_backlinks_to_competitors: referrer.backlinks,
                        competitors: vec![contribution],
                    });
                }
            }
        }
    }

    gaps.sort_by(|a, b| {
        b.competitor_count
            .cmp(&a.competitor_count)
            .then(b.domain_authority_score.cmp(&a.domain_authority_score))
    });
    gaps.truncate(limit);
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rd(domain: &str, rank: u32, backlinks: u64) -> ReferringDomain {
        ReferringDomain {
            domain: domain.to_string(),
            domain_inlink_rank: rank,
            backlinks,
            first_seen: String::new(),
        }
    }

    #[test]
    fn test_excludes_our_referring_domains() {
        let ours = vec![rd("Shared.org", 70, 3)];
        let sets = vec![
            CompetitorReferringDomains::new("a.com", vec![rd("shared.org", 70, 10), rd("only-a.net", 40, 2)]),
            CompetitorReferringDomains::new("b.com", vec![rd("shared.org", 70, 8)]),
        ];
        let gaps = aggregate_backlink_gaps(&ours, &sets, 10);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].domain, "only-a.net");
    }

    #[test]
    fn test_merges_and_sorts() {
        let sets = vec![
            CompetitorReferringDomains::new("a.com", vec![rd("news.org", 60, 5), rd("solo.org", 90, 1)]),
            CompetitorReferringDomains::new("b.com", vec![rd("news.org", 75, 7), rd("weak.org", 10, 1)]),
        ];
        let gaps = aggregate_backlink_gaps(&[], &sets, 10);

        let order: Vec<&str> = gaps.iter().map(|g| g.domain.as_str()).collect();
        assert_eq!(order, vec!["news.org", "solo.org", "weak.org"]);
        let news = &gaps[0];
        assert_eq!(news.competitor_count, 2);
        assert_eq!(news.competitors.len(), 2);
        assert_eq!(news.domain_authority_score, 75);
        assert_eq!(news.total_backlinks_to_competitors, 12);
    }

    #[test]
    fn test_limit() {
        let sets = vec![CompetitorReferringDomains::new(
            "a.com",
            vec![rd("a.org", 1, 1), rd("b.org", 2, 1), rd("c.org", 3, 1)],
        )];
        let gaps = aggregate_backlink_gaps(&[], &sets, 2);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].domain, "c.org");
    }
}
