//! Keyword payload parsers.

use rankscope_core::{ComparedKeyword, RankedKeyword};
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RankedRow {
    #[serde(deserialize_with = "lenient::string")]
    keyword: String,
    #[serde(deserialize_with = "lenient::u32")]
    position: u32,
    #[serde(deserialize_with = "lenient::u32")]
    prev_pos: u32,
    #[serde(deserialize_with = "lenient::u64")]
    volume: u64,
    #[serde(deserialize_with = "lenient::u32")]
    difficulty: u32,
    #[serde(deserialize_with = "lenient::f64")]
    cpc: f64,
    #[serde(deserialize_with = "lenient::u64")]
    traffic: u64,
    #[serde(deserialize_with = "lenient::string")]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComparedRow {
    #[serde(deserialize_with = "lenient::string")]
    keyword: String,
    #[serde(deserialize_with = "lenient::u64")]
    volume: u64,
    #[serde(deserialize_with = "lenient::u32")]
    difficulty: u32,
    #[serde(deserialize_with = "lenient::u32")]
    position: u32,
    #[serde(deserialize_with = "lenient::u32")]
    compare_position: u32,
}

/// Parses one page of ranked keywords. Rows without a keyword are dropped.
pub fn parse_ranked_keywords(payload: &Value) -> Vec<RankedKeyword> {
    let rows: Vec<RankedRow> = lenient::records(lenient::rows(payload, "keywords"));
    rows.into_iter()
        .filter(|r| !r.keyword.is_empty())
        .map(|r| RankedKeyword {
            keyword: r.keyword,
            position: r.position,
            previous_position: r.prev_pos,
            volume: r.volume,
            difficulty: r.difficulty,
            cpc: r.cpc,
            traffic: r.traffic,
            url: r.url,
        })
        .collect()
}

/// Parses a comparison listing. `position` is the compared domain's rank,
/// `compare_position` ours (0 when we do not rank).
pub fn parse_compared_keywords(payload: &Value) -> Vec<ComparedKeyword> {
    let rows: Vec<ComparedRow> = lenient::records(lenient::rows(payload, "keywords"));
    rows.into_iter()
        .filter(|r| !r.keyword.is_empty())
        .map(|r| ComparedKeyword {
            keyword: r.keyword,
            volume: r.volume,
            difficulty: r.difficulty,
            position: r.position,
            compare_position: r.compare_position,
        })
        .collect()
}
