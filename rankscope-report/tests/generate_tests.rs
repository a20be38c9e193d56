//! End-to-end report generation against a canned provider.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use rankscope_core::{
    DistributionSource, PromptClassification, QuickWinKind, ReportStatus, ReportStore,
    StoredReport,
};
use rankscope_fetch::{CannedTransport, GatewayConfig, RateLimitConfig};
use rankscope_report::{CredentialSource, Progress, ReportConfig, ReportGenerator, ReportRequest};
use serde_json::json;

#[derive(Default)]
struct MapStore {
    records: Mutex<HashMap<String, StoredReport>>,
}

impl ReportStore for MapStore {
    type Error = Infallible;

    async fn save(&self, id: &str, record: &StoredReport) -> Result<(), Infallible> {
        self.records.lock().unwrap().insert(id.to_string(), record.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<StoredReport>, Infallible> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }
}

fn provider() -> CannedTransport {
    CannedTransport::new()
        .respond(
            "/v1/domain/overview/worldwide",
            json!([
                {"source": "worldwide", "organic": {"up": 10, "down": 4}, "adv": {"new": 1}},
                {"source": "US", "organic": {"traffic": "9,000"}},
                {"source": "de", "organic": {"traffic": 700}}
            ]),
        )
        .respond(
            "/v1/backlinks/summary",
            json!({"backlinks": 1000, "refdomains": 1, "domain_inlink_rank": 55}),
        )
        .respond(
            "/v1/domain/overview",
            json!({"organic": {"keywords": 2, "traffic": 9000}, "adv": {"traffic": 50}}),
        )
        .respond(
            "/v1/domain/keywords",
            json!({"keywords": [
                {"keyword": "nike shoes", "position": 1, "volume": 5000},
                {"keyword": "air max", "position": 14, "volume": 2000}
            ]}),
        )
        .respond(
            "/v1/domain/competitors",
            json!([
                {"domain": "nike.com", "common_keywords": 900},
                {"domain": "adidas.com", "common_keywords": 500},
                {"domain": "puma.com", "common_keywords": 300}
            ]),
        )
        .respond(
            "/v1/domain/ads",
            json!({"ads": [{"keyword": "Shoes"}, {"keyword": "shoes"}]}),
        )
        .respond_when(
            "/v1/backlinks/refdomains",
            json!({"target": "nike.com"}),
            json!({"refdomains": [{"domain": "blog.com", "domain_inlink_rank": 40}]}),
        )
        .respond_when(
            "/v1/backlinks/refdomains",
            json!({"target": "adidas.com"}),
            json!({"refdomains": [
                {"domain": "Blog.com", "domain_inlink_rank": 40, "backlinks": 9},
                {"domain": "news.com", "domain_inlink_rank": 60, "backlinks": 3}
            ]}),
        )
        .respond_when(
            "/v1/backlinks/refdomains",
            json!({"target": "puma.com"}),
            json!({"refdomains": [{"domain": "news.com", "domain_inlink_rank": 70, "backlinks": 2}]}),
        )
        .respond_when(
            "/v1/domain/keywords/comparison",
            json!({"domain": "adidas.com", "diff": 1}),
            json!({"keywords": [
                {"keyword": "running shoes", "volume": 1000, "difficulty": 40, "position": 3, "compare_position": 0},
                {"keyword": "trail shoes", "volume": 500, "position": 7, "compare_position": 0}
            ]}),
        )
        .respond_when(
            "/v1/domain/keywords/comparison",
            json!({"domain": "puma.com", "diff": 1}),
            json!({"keywords": [
                {"keyword": "running shoes", "volume": 1200, "difficulty": 35, "position": 5, "compare_position": 0}
            ]}),
        )
        .respond_when(
            "/v1/domain/keywords/comparison",
            json!({"domain": "adidas.com", "diff": 0}),
            json!({"keywords": [
                {"keyword": "sneakers", "volume": 800, "position": 2, "compare_position": 6}
            ]}),
        )
        .respond_when(
            "/v1/domain/keywords/comparison",
            json!({"domain": "puma.com", "diff": 0}),
            json!({"keywords": []}),
        )
        .respond_when(
            "/v1/ai-search/prompts",
            json!({"brand": "nike"}),
            json!({"prompts": [{"prompt": "best shoes", "type": "brand", "volume": 300}]}),
        )
        .respond_when(
            "/v1/ai-search/prompts",
            json!({"target": "nike.com"}),
            json!({"prompts": [
                {"prompt": "Best Shoes", "type": "link", "volume": 100},
                {"prompt": "where to buy sneakers", "volume": 900}
            ]}),
        )
        .respond(
            "/v1/ai-search/leaderboard",
            json!({"leaderboard": [
                {"domain": "adidas.com", "share_of_voice": 40.0},
                {"domain": "nike.com", "share_of_voice": 31.5, "is_primary": true}
            ]}),
        )
}

fn generator(transport: Arc<CannedTransport>) -> ReportGenerator {
    let gateway = GatewayConfig {
        rate_limit: RateLimitConfig {
            capacity: 1000,
            refill_per_second: 1000.0,
        },
        ..Default::default()
    };
    let config = ReportConfig {
        max_competitors: 2,
        ai_engines: vec!["chatgpt".to_string()],
        ..Default::default()
    };
    ReportGenerator::new(gateway, config).with_transport(transport)
}

#[tokio::test]
async fn test_full_report() {
    let transport = Arc::new(provider());
    let generator = generator(transport.clone());
    let (progress, mut events) = Progress::with_events();
    let request = ReportRequest::new("https://www.nike.com/").with_id("r-1");
    let credentials = CredentialSource::new().shared(Some("shared-key".to_string()));

    let report = generator.generate(&request, &credentials, &progress).await.unwrap();

    // Overview
    assert_eq!(report.id, "r-1");
    assert_eq!(report.domain, "nike.com");
    assert_eq!(report.brand, "nike");
    assert_eq!(report.market, "us");
    assert_eq!(report.overview.worldwide.countries.len(), 2);
    assert_eq!(report.summary.position_changes.up, 10);
    assert_eq!(report.summary.position_changes.new, 1);
    assert_eq!(report.summary.organic_traffic, 9000);
    assert_eq!(report.summary.paid_traffic, 50);

    // Keywords
    assert_eq!(report.keywords.total, 2);
    assert_eq!(report.keywords.distribution_source, DistributionSource::Derived);
    assert_eq!(report.keywords.distribution.top3, 1);
    assert_eq!(report.keywords.distribution.top20, 2);

    // Competitors
    let analysis = &report.competitors.analysis;
    assert_eq!(analysis.competitors, vec!["adidas.com", "puma.com"]);
    assert_eq!(analysis.keyword_gaps[0].keyword, "running shoes");
    assert_eq!(analysis.keyword_gaps[0].competitor_count, 2);
    assert_eq!(analysis.keyword_gaps[0].volume, 1200);
    assert_eq!(analysis.keyword_gaps[0].difficulty, 40);
    assert_eq!(analysis.keyword_gaps[0].avg_position, 4);
    assert_eq!(analysis.keyword_gaps[1].keyword, "trail shoes");
    assert_eq!(analysis.keyword_overlaps[0].keyword, "sneakers");
    assert_eq!(analysis.keyword_overlaps[0].position_gap, 4);
    assert_eq!(analysis.backlink_gaps.len(), 1);
    assert_eq!(analysis.backlink_gaps[0].domain, "news.com");
    assert_eq!(analysis.backlink_gaps[0].domain_authority_score, 70);
    assert_eq!(analysis.backlink_gaps[0].total_backlinks_to_competitors, 5);
    assert_eq!(analysis.summary.traffic_opportunity, 120);
    assert_eq!(report.summary.keyword_gaps, 2);

    // AI search
    let prompts = &report.ai_search.prompts;
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].prompt, "where to buy sneakers");
    assert_eq!(prompts[0].classification, PromptClassification::Link);
    assert_eq!(prompts[1].prompt, "best shoes");
    assert_eq!(prompts[1].classification, PromptClassification::BrandLink);
    assert!((report.summary.ai_share_of_voice - 31.5).abs() < f64::EPSILON);

    // Ads and quick wins
    assert_eq!(report.ads.total_ads, 2);
    assert_eq!(report.ads.keywords, 1);
    let near = report
        .quick_wins
        .iter()
        .find(|w| w.kind == QuickWinKind::NearPageOne)
        .unwrap();
    assert_eq!(near.estimated_traffic, 300);

    // Diagnostics: authority, anchors and top backlinks have no canned route
    let diagnostics = &report.diagnostics;
    assert_eq!(diagnostics.notes.len(), 3);
    assert_eq!(diagnostics.call_count, diagnostics.calls.len() as u64);
    assert_eq!(diagnostics.total_credits, 1204);
    assert!(
        transport
            .requests()
            .iter()
            .all(|r| r.auth_token == "shared-key")
    );

    let mut percents = Vec::new();
    while let Ok(event) = events.try_recv() {
        percents.push(event.percent);
    }
    assert_eq!(percents, vec![5, 20, 40, 55, 75, 95, 100]);
    assert_eq!(progress.status(), ReportStatus::Completed);
}

#[tokio::test]
async fn test_named_competitors_and_pinned_market() {
    let transport = Arc::new(provider());
    let generator = generator(transport.clone());
    let request = ReportRequest::new("nike.com")
        .market("DE")
        .brand("Nike Inc")
        .competitors(["puma.com"])
        .api_key("caller-key");

    let report = generator
        .generate(&request, &CredentialSource::new(), &Progress::new())
        .await
        .unwrap();

    assert_eq!(report.market, "de");
    assert_eq!(report.brand, "Nike Inc");
    assert_eq!(report.competitors.analysis.competitors, vec!["puma.com"]);
    assert_eq!(report.competitors.discovered.len(), 3);
    assert_eq!(transport.request_count("/v1/domain/keywords/comparison"), 2);
}

#[tokio::test]
async fn test_generate_and_store_records_outcome() {
    let store = MapStore::default();
    let generator = generator(Arc::new(provider()));

    let ok = ReportRequest::new("nike.com").with_id("ok").api_key("key");
    let report = generator
        .generate_and_store(&ok, &CredentialSource::new(), &Progress::new(), &store)
        .await
        .unwrap();
    let stored = store.load("ok").await.unwrap().unwrap();
    assert_eq!(stored.status, ReportStatus::Completed);
    assert_eq!(stored.report.as_ref(), Some(&report));
    assert!(stored.expires_at > stored.created_at);

    let missing_key = ReportRequest::new("nike.com").with_id("bad");
    let err = generator
        .generate_and_store(&missing_key, &CredentialSource::new(), &Progress::new(), &store)
        .await
        .unwrap_err();
    assert!(err.is_fatal_configuration());
    let stored = store.load("bad").await.unwrap().unwrap();
    assert!(stored.status.is_failed());
    assert!(stored.report.is_none());
}
