//! Paid ads payload parser.

use rankscope_core::{AdsSummary, PaidAd};
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdRow {
    #[serde(deserialize_with = "lenient::string")]
    keyword: String,
    #[serde(deserialize_with = "lenient::u32")]
    position: u32,
    #[serde(deserialize_with = "lenient::string")]
    title: String,
    #[serde(deserialize_with = "lenient::string")]
    text: String,
    #[serde(deserialize_with = "lenient::string")]
    url: String,
    #[serde(deserialize_with = "lenient::u64")]
    volume: u64,
    #[serde(deserialize_with = "lenient::f64")]
    cpc: f64,
}

/// Parses the paid ads listing into a summary.
pub fn parse_ads(payload: &Value) -> AdsSummary {
    let rows: Vec<AdRow> = lenient::records(lenient::rows(payload, "ads"));
    AdsSummary::from_ads(
        rows.into_iter()
            .filter(|r| !r.keyword.is_empty())
            .map(|r| PaidAd {
                keyword: r.keyword,
                position: r.position,
                title: r.title,
                text: r.text,
                url: r.url,
                volume: r.volume,
                cpc: r.cpc,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ads() {
        let summary = parse_ads(&json!({"ads": [
            {"keyword": "Nike Air", "position": 1, "title": "Shop Air", "url": "https://nike.com/air", "volume": 9900, "cpc": 0.9},
            {"keyword": "nike air", "position": 2},
            {"keyword": "", "position": 3}
        ]}));
        assert_eq!(summary.total_ads, 2);
        assert_eq!(summary.keywords, 1);
        assert_eq!(summary.ads[0].title, "Shop Air");
    }
}
