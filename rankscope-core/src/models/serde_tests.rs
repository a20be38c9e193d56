//! Serde serialization/deserialization tests for core types.
//!
//! Stored reports must come back exactly as they were written, so these
//! tests compare whole values after a JSON round-trip.

use chrono::{Duration, TimeZone, Utc};

use crate::{
    AdsSummary, AggregatedKeywordGap, AiPrompt, AuthorityDistribution, CallLogEntry,
    CompetitorAnalysis, CompetitorPosition, Diagnostics, ExecutiveSummary, HttpMethod,
    PromptClassification, QuickWin, QuickWinKind, Report, ReportStatus, StoredReport,
};

fn sample_report() -> Report {
    let generated_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut report = Report {
        id: "rpt-1".to_string(),
        domain: "example.com".to_string(),
        brand: "example".to_string(),
        market: "us".to_string(),
        generated_at,
        overview: Default::default(),
        keywords: Default::default(),
        backlinks: Default::default(),
        competitors: Default::default(),
        ai_search: Default::default(),
        ads: AdsSummary::default(),
        quick_wins: vec![QuickWin {
            kind: QuickWinKind::NearPageOne,
            title: "Push page-two keywords".to_string(),
            description: "3 keywords rank 11-20".to_string(),
            keyword_count: 3,
            estimated_traffic: 450,
        }],
        summary: ExecutiveSummary {
            market: "us".to_string(),
            ai_share_of_voice: 12.5,
            ..Default::default()
        },
        diagnostics: Diagnostics {
            calls: vec![CallLogEntry {
                endpoint: "/v1/backlinks/summary".to_string(),
                method: HttpMethod::Get,
                params: serde_json::json!({"target": "example.com"}),
                response: serde_json::json!({"backlinks": 10}),
                timestamp: generated_at,
                duration_ms: 120,
                records: 1,
                credits: 100,
            }],
            call_count: 1,
            total_credits: 100,
            notes: vec!["anchors: provider error".to_string()],
        },
    };
    report.backlinks.authority = AuthorityDistribution::from_ranks(vec![(5, 2), (55, 1)]);
    report.competitors.analysis = CompetitorAnalysis {
        competitors: vec!["a.com".to_string()],
        keyword_gaps: vec![AggregatedKeywordGap {
            keyword: "buy shoes".to_string(),
            volume: 1200,
            difficulty: 35,
            competitor_count: 1,
            competitors: vec![CompetitorPosition {
                domain: "a.com".to_string(),
                position: 2,
            }],
            avg_position: 2,
            best_position: 2,
        }],
        ..Default::default()
    };
    report.ai_search.prompts = vec![AiPrompt {
        prompt: "best shoes".to_string(),
        engine: "chatgpt".to_string(),
        classification: PromptClassification::BrandLink,
        rank: 1,
        volume: Some(900),
        snippet: None,
        sources: Some(vec!["https://example.com".to_string()]),
    }];
    report
}

#[test]
fn test_report_roundtrip_is_exact() {
    let report = sample_report();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_stored_report_roundtrip_keeps_diagnostics() {
    let report = sample_report();
    let expires = report.generated_at + Duration::days(7);
    let record = StoredReport::completed(report, expires);

    let json = serde_json::to_string_pretty(&record).unwrap();
    let parsed: StoredReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, record);
    let diagnostics = &parsed.report.as_ref().unwrap().diagnostics;
    assert_eq!(diagnostics.total_credits, 100);
    assert_eq!(diagnostics.calls.len(), 1);
}

#[test]
fn test_status_variants_roundtrip() {
    let variants = vec![
        ReportStatus::Pending,
        ReportStatus::Running {
            phase: 3,
            total: 6,
            step: "Analyzing backlink profile".to_string(),
        },
        ReportStatus::Completed,
        ReportStatus::Failed {
            error: "no usable credential".to_string(),
        },
    ];
    for status in variants {
        let json = serde_json::to_string(&status).unwrap();
        let parsed: ReportStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status, "round-trip failed for {json}");
    }
}

#[test]
fn test_classification_wire_names() {
    let cases = vec![
        (r#""brand""#, PromptClassification::Brand),
        (r#""link""#, PromptClassification::Link),
        (r#""brand_link""#, PromptClassification::BrandLink),
    ];
    for (json, expected) in cases {
        let parsed: PromptClassification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(serde_json::to_string(&expected).unwrap(), json);
    }
    assert!(serde_json::from_str::<PromptClassification>(r#""mention""#).is_err());
}

#[test]
fn test_quick_win_kind_snake_case() {
    let json = serde_json::to_string(&QuickWinKind::ContentGap).unwrap();
    assert_eq!(json, r#""content_gap""#);
}
