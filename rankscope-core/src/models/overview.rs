//! Domain overview records.
//!
//! - [`DomainOverview`] - Totals for one market
//! - [`WorldwideOverview`] - Per-country breakdown plus global position changes
//! - [`PositionDistribution`] - Keyword counts by ranking threshold
//! - [`Competitor`] - Organic competitor discovered by the provider

use serde::{Deserialize, Serialize};

// ============================================================================
// Traffic
// ============================================================================

/// Keyword/traffic totals for one result type (organic or paid).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    /// Ranking keywords.
    pub keywords: u64,
    /// Estimated monthly visits.
    pub traffic: u64,
    /// Estimated monthly traffic value.
    pub traffic_cost: f64,
}

/// Keyword counts at or under each ranking threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDistribution {
    /// Positions 1-3.
    pub top3: u64,
    /// Positions 1-10.
    pub top10: u64,
    /// Positions 1-20.
    pub top20: u64,
    /// Positions 1-50.
    pub top50: u64,
    /// Positions 1-100.
    pub top100: u64,
}

impl PositionDistribution {
    /// Counts positions at or under each threshold. Position 0 means unranked.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut dist = Self::default();
        for pos in positions.into_iter().filter(|p| *p > 0) {
            if pos <= 3 {
                dist.top3 += 1;
            }
            if pos <= 10 {
                dist.top10 += 1;
            }
            if pos <= 20 {
                dist.top20 += 1;
            }
            if pos <= 50 {
                dist.top50 += 1;
            }
            if pos <= 100 {
                dist.top100 += 1;
            }
        }
        dist
    }

    /// Returns true when every count is zero.
    pub fn is_empty(&self) -> bool {
        self.top100 == 0 && self.top50 == 0 && self.top20 == 0 && self.top10 == 0 && self.top3 == 0
    }
}

// ============================================================================
// Market Overview
// ============================================================================

/// Organic and paid totals for a domain in one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainOverview {
    /// Market (country database) code, e.g. `us`.
    pub market: String,
    /// Organic search totals.
    pub organic: TrafficMetrics,
    /// Paid search totals.
    pub paid: TrafficMetrics,
    /// Provider-supplied top-N counts, when the provider reports them.
    pub positions: Option<PositionDistribution>,
}

// ============================================================================
// Worldwide Breakdown
// ============================================================================

/// Position movement counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChanges {
    /// Keywords that moved up.
    pub up: u64,
    /// Keywords that moved down.
    pub down: u64,
    /// Newly ranking keywords.
    pub new: u64,
    /// Keywords that stopped ranking.
    pub lost: u64,
}

impl PositionChanges {
    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            up: self.up + other.up,
            down: self.down + other.down,
            new: self.new + other.new,
            lost: self.lost + other.lost,
        }
    }
}

/// Totals for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryMetrics {
    /// Country (market) code.
    pub country: String,
    /// Organic totals.
    pub organic: TrafficMetrics,
    /// Paid totals.
    pub paid: TrafficMetrics,
}

/// Per-country breakdown with global position changes.
///
/// The provider's aggregate row never appears in `countries`; it only feeds
/// `changes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldwideOverview {
    /// One entry per country, as reported.
    pub countries: Vec<CountryMetrics>,
    /// Global changes summed across organic and paid results.
    pub changes: PositionChanges,
}

impl WorldwideOverview {
    /// The country with the most organic traffic. Ties keep the first reported.
    pub fn top_market(&self) -> Option<&CountryMetrics> {
        self.countries.iter().fold(None, |best, c| match best {
            Some(b) if b.organic.traffic >= c.organic.traffic => Some(b),
            _ => Some(c),
        })
    }
}

// ============================================================================
// Competitors
// ============================================================================

/// An organic competitor reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Competitor domain.
    pub domain: String,
    /// Keywords both domains rank for.
    pub common_keywords: u64,
    /// All keywords the competitor ranks for.
    pub total_keywords: u64,
    /// Competitor's estimated organic traffic.
    pub traffic: u64,
}
