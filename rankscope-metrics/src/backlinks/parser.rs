//! Backlink payload parsers.

use rankscope_core::{Anchor, AuthorityDistribution, Backlink, BacklinksSummary, ReferringDomain};
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;
use crate::normalize;

// ============================================================================
// Payload Schemas
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryPayload {
    #[serde(deserialize_with = "lenient::u64")]
    backlinks: u64,
    #[serde(deserialize_with = "lenient::u64")]
    refdomains: u64,
    #[serde(deserialize_with = "lenient::u64")]
    subnets: u64,
    #[serde(deserialize_with = "lenient::u64")]
    ips: u64,
    #[serde(deserialize_with = "lenient::u64")]
    dofollow_backlinks: u64,
    #[serde(deserialize_with = "lenient::u64")]
    nofollow_backlinks: u64,
    #[serde(deserialize_with = "lenient::u32")]
    inlink_rank: u32,
    #[serde(deserialize_with = "lenient::u32")]
    domain_inlink_rank: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthorityRow {
    #[serde(deserialize_with = "lenient::u32")]
    rank: u32,
    #[serde(deserialize_with = "lenient::u64")]
    refdomains: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefDomainRow {
    #[serde(deserialize_with = "lenient::string")]
    domain: String,
    #[serde(deserialize_with = "lenient::u32")]
    domain_inlink_rank: u32,
    #[serde(deserialize_with = "lenient::u64")]
    backlinks: u64,
    #[serde(deserialize_with = "lenient::string")]
    first_seen: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnchorRow {
    #[serde(deserialize_with = "lenient::string")]
    anchor: String,
    #[serde(deserialize_with = "lenient::u64")]
    backlinks: u64,
    #[serde(deserialize_with = "lenient::u64")]
    refdomains: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BacklinkRow {
    #[serde(deserialize_with = "lenient::string")]
    url_from: String,
    #[serde(deserialize_with = "lenient::string")]
    url_to: String,
    #[serde(deserialize_with = "lenient::string")]
    anchor: String,
    #[serde(deserialize_with = "lenient::bool")]
    nofollow: bool,
    #[serde(deserialize_with = "lenient::u32")]
    inlink_rank: u32,
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses `/v1/backlinks/summary`. Missing counts are 0.
pub fn parse_summary(payload: &Value) -> BacklinksSummary {
    let raw: SummaryPayload = normalize::object(payload, "backlinks summary");
    BacklinksSummary {
        backlinks: raw.backlinks,
        refdomains: raw.refdomains,
        subnets: raw.subnets,
        ips: raw.ips,
        dofollow_backlinks: raw.dofollow_backlinks,
        nofollow_backlinks: raw.nofollow_backlinks,
        inlink_rank: raw.inlink_rank,
        domain_inlink_rank: raw.domain_inlink_rank,
    }
}

/// Parses `/v1/backlinks/authority`, re-bucketing per-rank counts into the
/// ten fixed ranges. Ranks above 100 are ignored.
pub fn parse_authority(payload: &Value) -> AuthorityDistribution {
    let rows: Vec<AuthorityRow> = lenient::records(lenient::rows(payload, "distribution"));
    AuthorityDistribution::from_ranks(rows.into_iter().map(|r| (r.rank, r.refdomains)))
}

/// Parses `/v1/backlinks/refdomains`. Rows without a domain are dropped.
pub fn parse_referring_domains(payload: &Value) -> Vec<ReferringDomain> {
    let rows: Vec<RefDomainRow> = lenient::records(lenient::rows(payload, "refdomains"));
    rows.into_iter()
        .filter(|r| !r.domain.is_empty())
        .map(|r| ReferringDomain {
            domain: r.domain,
            domain_inlink_rank: r.domain_inlink_rank,
            backlinks: r.backlinks,
            first_seen: r.first_seen,
        })
        .collect()
}

/// Parses `/v1/backlinks/anchors`.
pub fn parse_anchors(payload: &Value) -> Vec<Anchor> {
    let rows: Vec<AnchorRow> = lenient::records(lenient::rows(payload, "anchors"));
    rows.into_iter()
        .map(|r| Anchor {
            anchor: r.anchor,
            backlinks: r.backlinks,
            refdomains: r.refdomains,
        })
        .collect()
}

/// Parses `/v1/backlinks/top`. Rows without a source URL are dropped.
pub fn parse_top_backlinks(payload: &Value) -> Vec<Backlink> {
    let rows: Vec<BacklinkRow> = lenient::records(lenient::rows(payload, "backlinks"));
    rows.into_iter()
        .filter(|r| !r.url_from.is_empty())
        .map(|r| Backlink {
            url_from: r.url_from,
            url_to: r.url_to,
            anchor: r.anchor,
            nofollow: r.nofollow,
            inlink_rank: r.inlink_rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_summary() {
        let summary = parse_summary(&json!({
            "backlinks": 1500,
            "refdomains": "120",
            "subnets": 80,
            "ips": 95,
            "dofollow_backlinks": 1200,
            "nofollow_backlinks": 300,
            "inlink_rank": 41,
            "domain_inlink_rank": 57
        }));
        assert_eq!(summary.backlinks, 1500);
        assert_eq!(summary.refdomains, 120);
        assert_eq!(summary.domain_inlink_rank, 57);
        assert!((summary.dofollow_percent() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_authority_rebuckets() {
        let dist = parse_authority(&json!({
            "distribution": [
                {"rank": 0, "refdomains": 4},
                {"rank": 10, "refdomains": 1},
                {"rank": 11, "refdomains": 2},
                {"rank": 55, "refdomains": 3},
                {"rank": 60, "refdomains": 5},
                {"rank": 100, "refdomains": 7},
                {"rank": 140, "refdomains": 9}
            ]
        }));
        let counts: Vec<u64> = dist.buckets.iter().map(|b| b.refdomains).collect();
        assert_eq!(counts, vec![5, 2, 0, 0, 0, 8, 0, 0, 0, 7]);
        assert_eq!(dist.total(), 22);
    }

    #[test]
    fn test_parse_referring_domains() {
        let rows = parse_referring_domains(&json!({
            "refdomains": [
                {"domain": "blog.example.org", "domain_inlink_rank": 63, "backlinks": 12, "first_seen": "2024-02-01"},
                {"domain": "", "backlinks": 3},
                {"domain": "news.site", "backlinks": "4"}
            ]
        }));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].domain, "blog.example.org");
        assert_eq!(rows[1].backlinks, 4);
        assert_eq!(rows[1].domain_inlink_rank, 0);
    }

    #[test]
    fn test_parse_top_backlinks() {
        let links = parse_top_backlinks(&json!({
            "backlinks": [{"url_from": "https://a.org/p", "url_to": "https://t.com/", "anchor": "t", "nofollow": 1, "inlink_rank": 30}]
        }));
        assert_eq!(links.len(), 1);
        assert!(links[0].nofollow);
    }
}
