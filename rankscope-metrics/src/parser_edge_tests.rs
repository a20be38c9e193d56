//! Parser edge case tests.
//!
//! Every parser must turn an empty, null, or malformed payload into its
//! documented default. The defaults are enumerated field by field here so a
//! schema change that drops a default shows up as a test failure.

#[cfg(test)]
mod backlinks_edge_tests {
    use crate::backlinks::{
        parse_anchors, parse_authority, parse_referring_domains, parse_summary,
        parse_top_backlinks,
    };
    use rankscope_core::{AUTHORITY_BUCKETS, BacklinksSummary};
    use serde_json::json;

    #[test]
    fn test_summary_defaults_every_field() {
        for payload in [json!({}), json!(null), json!("error"), json!([])] {
            let s = parse_summary(&payload);
            assert_eq!(s.backlinks, 0);
            assert_eq!(s.refdomains, 0);
            assert_eq!(s.subnets, 0);
            assert_eq!(s.ips, 0);
            assert_eq!(s.dofollow_backlinks, 0);
            assert_eq!(s.nofollow_backlinks, 0);
            assert_eq!(s.inlink_rank, 0);
            assert_eq!(s.domain_inlink_rank, 0);
            assert_eq!(s, BacklinksSummary::default());
        }
    }

    #[test]
    fn test_summary_null_fields() {
        let s = parse_summary(&json!({"backlinks": null, "refdomains": "n/a", "ips": 3}));
        assert_eq!(s.backlinks, 0);
        assert_eq!(s.refdomains, 0);
        assert_eq!(s.ips, 3);
    }

    #[test]
    fn test_authority_empty_is_ten_zero_buckets() {
        for payload in [json!({}), json!({"distribution": null}), json!({"distribution": "x"})] {
            let dist = parse_authority(&payload);
            assert_eq!(dist.buckets.len(), AUTHORITY_BUCKETS);
            assert_eq!(dist.total(), 0);
            assert_eq!(dist.buckets[0].label(), "0-10");
            assert_eq!(dist.buckets[9].label(), "91-100");
        }
    }

    #[test]
    fn test_authority_row_defaults() {
        let dist = parse_authority(&json!({"distribution": [{"refdomains": 4}, {"rank": 50}]}));
        assert_eq!(dist.buckets[0].refdomains, 4);
        assert_eq!(dist.total(), 4);
    }

    #[test]
    fn test_list_parsers_empty() {
        assert!(parse_referring_domains(&json!({})).is_empty());
        assert!(parse_referring_domains(&json!({"refdomains": null})).is_empty());
        assert!(parse_anchors(&json!(null)).is_empty());
        assert!(parse_top_backlinks(&json!({"backlinks": {}})).is_empty());
    }

    #[test]
    fn test_list_row_defaults() {
        let domains = parse_referring_domains(&json!({"refdomains": [{"domain": "a.org"}]}));
        assert_eq!(domains[0].domain_inlink_rank, 0);
        assert_eq!(domains[0].backlinks, 0);
        assert_eq!(domains[0].first_seen, "");

        let anchors = parse_anchors(&json!({"anchors": [{}]}));
        assert_eq!(anchors[0].anchor, "");
        assert_eq!(anchors[0].backlinks, 0);
        assert_eq!(anchors[0].refdomains, 0);

        let links = parse_top_backlinks(&json!({"backlinks": [{"url_from": "https://a.org"}]}));
        assert_eq!(links[0].url_to, "");
        assert_eq!(links[0].anchor, "");
        assert!(!links[0].nofollow);
        assert_eq!(links[0].inlink_rank, 0);
    }
}

#[cfg(test)]
mod overview_edge_tests {
    use crate::overview::{parse_competitors, parse_market_overview, parse_worldwide};
    use rankscope_core::{PositionChanges, TrafficMetrics, WorldwideOverview};
    use serde_json::json;

    #[test]
    fn test_worldwide_defaults() {
        for payload in [json!([]), json!({}), json!(null), json!("boom")] {
            assert_eq!(parse_worldwide(&payload), WorldwideOverview::default());
        }
    }

    #[test]
    fn test_worldwide_row_defaults() {
        let overview = parse_worldwide(&json!([{"source": "fr"}, {"source": "worldwide"}]));
        assert_eq!(overview.countries[0].organic, TrafficMetrics::default());
        assert_eq!(overview.countries[0].paid, TrafficMetrics::default());
        assert_eq!(overview.changes, PositionChanges::default());
    }

    #[test]
    fn test_worldwide_skips_rows_without_source() {
        let overview = parse_worldwide(&json!([{"organic": {"traffic": 10}}]));
        assert!(overview.countries.is_empty());
    }

    #[test]
    fn test_market_overview_defaults() {
        let overview = parse_market_overview(&json!({}), "us");
        assert_eq!(overview.market, "us");
        assert_eq!(overview.organic.keywords, 0);
        assert_eq!(overview.organic.traffic, 0);
        assert!(overview.organic.traffic_cost.abs() < f64::EPSILON);
        assert_eq!(overview.paid, TrafficMetrics::default());
        assert!(overview.positions.is_none());
    }

    #[test]
    fn test_market_overview_position_defaults() {
        let overview = parse_market_overview(&json!({"positions": {}}), "us");
        let positions = overview.positions.unwrap();
        assert_eq!(positions.top3, 0);
        assert_eq!(positions.top10, 0);
        assert_eq!(positions.top20, 0);
        assert_eq!(positions.top50, 0);
        assert_eq!(positions.top100, 0);
    }

    #[test]
    fn test_competitor_row_defaults() {
        let competitors = parse_competitors(&json!([{"domain": "x.com"}]));
        assert_eq!(competitors[0].common_keywords, 0);
        assert_eq!(competitors[0].total_keywords, 0);
        assert_eq!(competitors[0].traffic, 0);
        assert!(parse_competitors(&json!({})).is_empty());
    }
}

#[cfg(test)]
mod keywords_edge_tests {
    use crate::keywords::{parse_compared_keywords, parse_ranked_keywords};
    use serde_json::json;

    #[test]
    fn test_empty_payloads() {
        for payload in [json!({}), json!(null), json!({"keywords": null}), json!({"keywords": 5})] {
            assert!(parse_ranked_keywords(&payload).is_empty());
            assert!(parse_compared_keywords(&payload).is_empty());
        }
    }

    #[test]
    fn test_ranked_row_defaults() {
        let keywords = parse_ranked_keywords(&json!({"keywords": [{"keyword": "k"}]}));
        let k = &keywords[0];
        assert_eq!(k.position, 0);
        assert_eq!(k.previous_position, 0);
        assert_eq!(k.volume, 0);
        assert_eq!(k.difficulty, 0);
        assert!(k.cpc.abs() < f64::EPSILON);
        assert_eq!(k.traffic, 0);
        assert_eq!(k.url, "");
    }

    #[test]
    fn test_compared_row_defaults() {
        let keywords = parse_compared_keywords(&json!([{"keyword": "k"}]));
        let k = &keywords[0];
        assert_eq!(k.volume, 0);
        assert_eq!(k.difficulty, 0);
        assert_eq!(k.position, 0);
        assert_eq!(k.compare_position, 0);
    }

    #[test]
    fn test_numeric_keyword_text() {
        let keywords = parse_ranked_keywords(&json!({"keywords": [{"keyword": 404, "position": "3"}]}));
        assert_eq!(keywords[0].keyword, "404");
        assert_eq!(keywords[0].position, 3);
    }
}

#[cfg(test)]
mod ai_search_edge_tests {
    use crate::ai_search::{parse_leaderboard, parse_prompts};
    use rankscope_core::PromptClassification;
    use serde_json::json;

    #[test]
    fn test_empty_payloads() {
        for payload in [json!({}), json!(null), json!({"prompts": "none"})] {
            assert!(parse_prompts(&payload, "x", PromptClassification::Brand).is_empty());
            assert!(parse_leaderboard(&payload).is_empty());
        }
    }

    #[test]
    fn test_prompt_row_defaults() {
        let prompts = parse_prompts(&json!({"prompts": [{"prompt": "p"}]}), "x", PromptClassification::Brand);
        let p = &prompts[0];
        assert_eq!(p.classification, PromptClassification::Brand);
        assert_eq!(p.rank, 0);
        assert_eq!(p.volume, None);
        assert_eq!(p.snippet, None);
        assert_eq!(p.sources, None);
    }

    #[test]
    fn test_unknown_type_uses_fallback() {
        let prompts = parse_prompts(
            &json!({"prompts": [{"prompt": "p", "type": "citation"}]}),
            "x",
            PromptClassification::Link,
        );
        assert_eq!(prompts[0].classification, PromptClassification::Link);
    }

    #[test]
    fn test_volume_string_and_garbage() {
        let prompts = parse_prompts(
            &json!({"prompts": [{"prompt": "a", "volume": "300"}, {"prompt": "b", "volume": "lots"}]}),
            "x",
            PromptClassification::Brand,
        );
        assert_eq!(prompts[0].volume, Some(300));
        assert_eq!(prompts[1].volume, None);
    }

    #[test]
    fn test_leaderboard_row_defaults() {
        let board = parse_leaderboard(&json!({"leaderboard": [{"domain": "a.com"}]}));
        assert_eq!(board[0].brand, "");
        assert!(board[0].share_of_voice.abs() < f64::EPSILON);
        assert_eq!(board[0].mentions, 0);
        assert!(!board[0].is_primary);
    }
}

#[cfg(test)]
mod ads_edge_tests {
    use crate::ads::parse_ads;
    use rankscope_core::AdsSummary;
    use serde_json::json;

    #[test]
    fn test_empty_payloads() {
        for payload in [json!({}), json!(null), json!({"ads": null})] {
            assert_eq!(parse_ads(&payload), AdsSummary::default());
        }
    }

    #[test]
    fn test_ad_row_defaults() {
        let summary = parse_ads(&json!({"ads": [{"keyword": "k"}]}));
        let ad = &summary.ads[0];
        assert_eq!(ad.position, 0);
        assert_eq!(ad.title, "");
        assert_eq!(ad.text, "");
        assert_eq!(ad.url, "");
        assert_eq!(ad.volume, 0);
        assert!(ad.cpc.abs() < f64::EPSILON);
    }
}
