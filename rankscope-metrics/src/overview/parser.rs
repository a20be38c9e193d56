//! Domain overview payload parsers.
//!
//! Overview rows carry an `organic` and an `adv` (paid) block:
//!
//! ```json
//! { "source": "us",
//!   "organic": { "keywords": 1200, "traffic": 5400, "traffic_cost": 830.5,
//!                "up": 40, "down": 12, "new": 7, "lost": 3 },
//!   "adv": { "keywords": 15, "traffic": 90, "traffic_cost": 120.0 } }
//! ```

use rankscope_core::{
    Competitor, CountryMetrics, DomainOverview, PositionChanges, PositionDistribution,
    TrafficMetrics, WorldwideOverview,
};
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;
use crate::normalize;

/// Source marker of the aggregate row in the worldwide breakdown.
pub const WORLDWIDE_SOURCE: &str = "worldwide";

// ============================================================================
// Payload Schemas
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResultSet {
    #[serde(deserialize_with = "lenient::u64")]
    keywords: u64,
    #[serde(deserialize_with = "lenient::u64")]
    traffic: u64,
    #[serde(deserialize_with = "lenient::f64")]
    traffic_cost: f64,
    #[serde(deserialize_with = "lenient::u64")]
    up: u64,
    #[serde(deserialize_with = "lenient::u64")]
    down: u64,
    #[serde(deserialize_with = "lenient::u64")]
    new: u64,
    #[serde(deserialize_with = "lenient::u64")]
    lost: u64,
}

impl ResultSet {
    fn traffic(&self) -> TrafficMetrics {
        TrafficMetrics {
            keywords: self.keywords,
            traffic: self.traffic,
            traffic_cost: self.traffic_cost,
        }
    }

    fn changes(&self) -> PositionChanges {
        PositionChanges {
            up: self.up,
            down: self.down,
            new: self.new,
            lost: self.lost,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OverviewRow {
    #[serde(deserialize_with = "lenient::string")]
    source: String,
    organic: Option<ResultSet>,
    adv: Option<ResultSet>,
    positions: Option<PositionsBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PositionsBlock {
    #[serde(deserialize_with = "lenient::u64")]
    top3: u64,
    #[serde(deserialize_with = "lenient::u64")]
    top10: u64,
    #[serde(deserialize_with = "lenient::u64")]
    top20: u64,
    #[serde(deserialize_with = "lenient::u64")]
    top50: u64,
    #[serde(deserialize_with = "lenient::u64")]
    top100: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompetitorRow {
    #[serde(deserialize_with = "lenient::string")]
    domain: String,
    #[serde(deserialize_with = "lenient::u64")]
    common_keywords: u64,
    #[serde(deserialize_with = "lenient::u64")]
    total_keywords: u64,
    #[serde(deserialize_with = "lenient::u64")]
    traffic: u64,
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses the worldwide breakdown.
///
/// The row whose source is [`WORLDWIDE_SOURCE`] is the aggregate: it is
/// left out of the country list and only supplies the position changes,
/// summed over organic and paid results.
pub fn parse_worldwide(payload: &Value) -> WorldwideOverview {
    let rows: Vec<OverviewRow> = lenient::records(lenient::rows(payload, "data"));

    let mut overview = WorldwideOverview::default();
    for row in rows {
        if row.source.eq_ignore_ascii_case(WORLDWIDE_SOURCE) {
            let organic = row.organic.unwrap_or_default().changes();
            let paid = row.adv.unwrap_or_default().changes();
            overview.changes = overview.changes.add(organic.add(paid));
        } else if !row.source.is_empty() {
            overview.countries.push(CountryMetrics {
                country: row.source.to_ascii_lowercase(),
                organic: row.organic.unwrap_or_default().traffic(),
                paid: row.adv.unwrap_or_default().traffic(),
            });
        }
    }
    overview
}

/// Parses the single-market overview.
///
/// `positions` is only `Some` when the provider sent a top-N block.
pub fn parse_market_overview(payload: &Value, market: &str) -> DomainOverview {
    let row: OverviewRow = normalize::object(payload, "market overview");
    DomainOverview {
        market: market.to_string(),
        organic: row.organic.unwrap_or_default().traffic(),
        paid: row.adv.unwrap_or_default().traffic(),
        positions: row.positions.map(|p| PositionDistribution {
            top3: p.top3,
            top10: p.top10,
            top20: p.top20,
            top50: p.top50,
            top100: p.top100,
        }),
    }
}

/// Parses the organic competitor list. Rows without a domain are dropped.
pub fn parse_competitors(payload: &Value) -> Vec<Competitor> {
    let rows: Vec<CompetitorRow> = lenient::records(lenient::rows(payload, "competitors"));
    rows.into_iter()
        .filter(|r| !r.domain.is_empty())
        .map(|r| Competitor {
            domain: r.domain.to_ascii_lowercase(),
            common_keywords: r.common_keywords,
            total_keywords: r.total_keywords,
            traffic: r.traffic,
        })
        .collect()
}
