//! Keyword fetcher.

use rankscope_core::{ComparedKeyword, RankedKeyword};
use rankscope_fetch::{Gateway, GatewayError};
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::parser;

const KEYWORDS: &str = "/v1/domain/keywords";
const COMPARISON: &str = "/v1/domain/keywords/comparison";

/// Rows requested per ranked-keyword page.
pub const PAGE_SIZE: usize = 500;

/// Which side of a keyword comparison to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    /// Keywords the competitor ranks for and we do not.
    Gap,
    /// Keywords both domains rank for.
    Common,
}

impl Comparison {
    fn diff_flag(self) -> u8 {
        match self {
            Self::Gap => 1,
            Self::Common => 0,
        }
    }
}

/// Fetches and normalizes keyword rankings.
#[derive(Debug, Clone, Copy)]
pub struct KeywordsFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> KeywordsFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Up to `limit` ranked keywords for `domain` in `market`.
    ///
    /// Pages through the provider in chunks of [`PAGE_SIZE`] until the limit
    /// is met or a short page comes back. A failure after the first page
    /// keeps the rows already fetched.
    #[instrument(skip(self))]
    pub async fn ranked(
        &self,
        domain: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<RankedKeyword>, GatewayError> {
        let mut keywords = Vec::new();

        while keywords.len() < limit {
            let offset = keywords.len();
            let page_size = PAGE_SIZE.min(limit - offset);
            let params = json!({
                "domain": domain,
                "source": market,
                "limit": page_size,
                "offset": offset,
            });

            let payload = match self.gateway.get(KEYWORDS, params).await {
                Ok(payload) => payload,
                Err(e) if offset > 0 => {
                    warn!(offset, error = %e, "Keyword paging stopped early");
                    self.gateway
                        .record_note(format!("ranked keywords (offset {offset}): {e}"));
                    break;
                }
                Err(e) => return Err(e),
            };

            let page = parser::parse_ranked_keywords(&payload);
            let short = page.len() < page_size;
            keywords.extend(page);
            if short {
                break;
            }
        }

        keywords.truncate(limit);
        debug!(count = keywords.len(), "Fetched ranked keywords");
        Ok(keywords)
    }

    /// Keywords `competitor` ranks for and `target` does not.
    #[instrument(skip(self))]
    pub async fn gaps(
        &self,
        target: &str,
        competitor: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<ComparedKeyword>, GatewayError> {
        self.compare(target, competitor, market, limit, Comparison::Gap)
            .await
    }

    /// Keywords both `target` and `competitor` rank for.
    #[instrument(skip(self))]
    pub async fn common(
        &self,
        target: &str,
        competitor: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<ComparedKeyword>, GatewayError> {
        self.compare(target, competitor, market, limit, Comparison::Common)
            .await
    }

    async fn compare(
        &self,
        target: &str,
        competitor: &str,
        market: &str,
        limit: usize,
        comparison: Comparison,
    ) -> Result<Vec<ComparedKeyword>, GatewayError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let payload = self
            .gateway
            .get(
                COMPARISON,
                json!({
                    "domain": competitor,
                    "compare": target,
                    "source": market,
                    "diff": comparison.diff_flag(),
                    "limit": limit,
                }),
            )
            .await?;
        Ok(parser::parse_compared_keywords(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gateway;
    use rankscope_fetch::CannedTransport;
    use serde_json::Value;

    fn page(count: usize, start: usize) -> Value {
        let rows: Vec<Value> = (start..start + count)
            .map(|i| json!({"keyword": format!("kw {i}"), "position": 1 + i % 100}))
            .collect();
        json!({ "keywords": rows })
    }

    #[tokio::test]
    async fn test_ranked_pages_until_limit() {
        let (gw, transport) = gateway(
            CannedTransport::new()
                .respond_when(KEYWORDS, json!({"offset": 0}), page(500, 0))
                .respond_when(KEYWORDS, json!({"offset": 500}), page(500, 500)),
        );
        let keywords = KeywordsFetcher::new(&gw).ranked("t.com", "us", 700).await.unwrap();

        assert_eq!(keywords.len(), 700);
        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].params["limit"], json!(200));
        assert_eq!(sent[1].params["offset"], json!(500));
    }

    #[tokio::test]
    async fn test_ranked_stops_on_short_page() {
        let (gw, transport) = gateway(
            CannedTransport::new().respond_when(KEYWORDS, json!({"offset": 0}), page(120, 0)),
        );
        let keywords = KeywordsFetcher::new(&gw).ranked("t.com", "us", 1000).await.unwrap();
        assert_eq!(keywords.len(), 120);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_ranked_keeps_rows_when_later_page_fails() {
        let (gw, _) = gateway(
            CannedTransport::new()
                .respond_when(KEYWORDS, json!({"offset": 0}), page(500, 0))
                .respond_status_when(KEYWORDS, json!({"offset": 500}), 500, json!("down")),
        );
        let keywords = KeywordsFetcher::new(&gw).ranked("t.com", "us", 1000).await.unwrap();
        assert_eq!(keywords.len(), 500);
        assert_eq!(gw.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_ranked_first_page_failure_propagates() {
        let (gw, _) = gateway(CannedTransport::new().respond_status(KEYWORDS, 402, json!(null)));
        let err = KeywordsFetcher::new(&gw).ranked("t.com", "us", 10).await.unwrap_err();
        assert!(err.is_billing());
    }

    #[tokio::test]
    async fn test_comparison_params() {
        let (gw, transport) = gateway(CannedTransport::new().respond(COMPARISON, json!({"keywords": []})));
        let fetcher = KeywordsFetcher::new(&gw);
        fetcher.gaps("us.com", "them.com", "us", 100).await.unwrap();
        fetcher.common("us.com", "them.com", "us", 100).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].params["domain"], json!("them.com"));
        assert_eq!(sent[0].params["compare"], json!("us.com"));
        assert_eq!(sent[0].params["diff"], json!(1));
        assert_eq!(sent[1].params["diff"], json!(0));
    }
}
