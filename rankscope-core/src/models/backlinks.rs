//! Backlink metric records.

use serde::{Deserialize, Serialize};

// ============================================================================
// Summary
// ============================================================================

/// Aggregate backlink counts for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinksSummary {
    /// Total backlinks.
    pub backlinks: u64,
    /// Distinct referring domains.
    pub refdomains: u64,
    /// Distinct referring subnets.
    pub subnets: u64,
    /// Distinct referring IPs.
    pub ips: u64,
    /// Followed backlinks.
    pub dofollow_backlinks: u64,
    /// Nofollow backlinks.
    pub nofollow_backlinks: u64,
    /// Page-level authority score (0-100).
    pub inlink_rank: u32,
    /// Domain-level authority score (0-100).
    pub domain_inlink_rank: u32,
}

impl BacklinksSummary {
    /// Share of followed backlinks as a percentage, 0 when there are none.
    pub fn dofollow_percent(&self) -> f64 {
        if self.backlinks == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = self.dofollow_backlinks as f64 / self.backlinks as f64 * 100.0;
        pct
    }
}

// ============================================================================
// Authority Distribution
// ============================================================================

/// Number of fixed authority buckets.
pub const AUTHORITY_BUCKETS: usize = 10;

/// Referring-domain count for one inclusive authority range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityBucket {
    /// Lower bound (inclusive).
    pub from: u32,
    /// Upper bound (inclusive).
    pub to: u32,
    /// Referring domains whose authority falls in the range.
    pub refdomains: u64,
}

impl AuthorityBucket {
    /// Display label such as `11-20`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    /// Returns true if `rank` falls in this bucket.
    pub fn contains(&self, rank: u32) -> bool {
        (self.from..=self.to).contains(&rank)
    }
}

/// Referring domains re-bucketed into ten ranges: 0-10, 11-20, ..., 91-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityDistribution {
    /// Always exactly [`AUTHORITY_BUCKETS`] buckets in ascending order.
    pub buckets: Vec<AuthorityBucket>,
}

impl AuthorityDistribution {
    /// Ten empty buckets.
    pub fn empty() -> Self {
        let buckets = (0..AUTHORITY_BUCKETS as u32)
            .map(|i| AuthorityBucket {
                from: if i == 0 { 0 } else { i * 10 + 1 },
                to: (i + 1) * 10,
                refdomains: 0,
            })
            .collect();
        Self { buckets }
    }

    /// Re-buckets per-rank counts. Ranks above 100 are ignored.
    pub fn from_ranks<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut dist = Self::empty();
        for (rank, count) in counts {
            if let Some(bucket) = dist.buckets.iter_mut().find(|b| b.contains(rank)) {
                bucket.refdomains += count;
            }
        }
        dist
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.refdomains).sum()
    }
}

impl Default for AuthorityDistribution {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Lists
// ============================================================================

/// A domain linking to the analysed target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferringDomain {
    /// Referring domain host.
    pub domain: String,
    /// Authority score of the referring domain.
    pub domain_inlink_rank: u32,
    /// Backlinks from this domain to the target.
    pub backlinks: u64,
    /// First-seen date as reported by the provider, empty when unknown.
    pub first_seen: String,
}

/// Anchor text usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Anchor text.
    pub anchor: String,
    /// Backlinks using this anchor.
    pub backlinks: u64,
    /// Referring domains using this anchor.
    pub refdomains: u64,
}

/// A single backlink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    /// Linking page.
    pub url_from: String,
    /// Linked page on the target.
    pub url_to: String,
    /// Anchor text.
    pub anchor: String,
    /// Whether the link is nofollow.
    pub nofollow: bool,
    /// Authority score of the linking page.
    pub inlink_rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_distribution_ranges() {
        let dist = AuthorityDistribution::empty();
        assert_eq!(dist.buckets.len(), AUTHORITY_BUCKETS);
        assert_eq!(dist.buckets[0].label(), "0-10");
        assert_eq!(dist.buckets[1].label(), "11-20");
        assert_eq!(dist.buckets[9].label(), "91-100");
        assert_eq!(dist.total(), 0);
    }

    #[test]
    fn test_from_ranks_boundaries() {
        let dist = AuthorityDistribution::from_ranks(vec![
            (0, 1),
            (10, 2),
            (11, 4),
            (20, 8),
            (100, 16),
            (101, 32),
        ]);
        assert_eq!(dist.buckets[0].refdomains, 3);
        assert_eq!(dist.buckets[1].refdomains, 12);
        assert_eq!(dist.buckets[9].refdomains, 16);
        // Out-of-range rank dropped
        assert_eq!(dist.total(), 31);
    }

    #[test]
    fn test_dofollow_percent() {
        let summary = BacklinksSummary {
            backlinks: 200,
            dofollow_backlinks: 50,
            ..Default::default()
        };
        assert_eq!(summary.dofollow_percent(), 25.0);
        assert_eq!(BacklinksSummary::default().dofollow_percent(), 0.0);
    }
}
