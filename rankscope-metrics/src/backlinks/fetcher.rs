//! Backlink fetcher.

use rankscope_core::{Anchor, AuthorityDistribution, Backlink, BacklinksSummary, ReferringDomain};
use rankscope_fetch::{Gateway, GatewayError};
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::parser;

const SUMMARY: &str = "/v1/backlinks/summary";
const AUTHORITY: &str = "/v1/backlinks/authority";
const REFDOMAINS: &str = "/v1/backlinks/refdomains";
const ANCHORS: &str = "/v1/backlinks/anchors";
const TOP: &str = "/v1/backlinks/top";

/// Rows requested per referring-domain page.
pub const PAGE_SIZE: usize = 500;

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches and normalizes the backlink profile of a domain.
#[derive(Debug, Clone, Copy)]
pub struct BacklinksFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> BacklinksFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Headline backlink counts.
    #[instrument(skip(self))]
    pub async fn summary(&self, target: &str) -> Result<BacklinksSummary, GatewayError> {
        let payload = self.gateway.get(SUMMARY, json!({ "target": target })).await?;
        Ok(parser::parse_summary(&payload))
    }

    /// Referring domains bucketed by authority.
    #[instrument(skip(self))]
    pub async fn authority(&self, target: &str) -> Result<AuthorityDistribution, GatewayError> {
        let payload = self.gateway.get(AUTHORITY, json!({ "target": target })).await?;
        Ok(parser::parse_authority(&payload))
    }

    /// The strongest `limit` referring domains, best first.
    #[instrument(skip(self))]
    pub async fn referring_domains(
        &self,
        target: &str,
        limit: usize,
    ) -> Result<Vec<ReferringDomain>, GatewayError> {
        self.referring_domains_from(target, 0, limit).await
    }

    /// Up to `limit` referring domains starting at rank `start`.
    ///
    /// Pages through the provider in chunks of [`PAGE_SIZE`] until the limit
    /// is met or a short page comes back. A failure after the first page
    /// keeps the rows already fetched.
    #[instrument(skip(self))]
    pub async fn referring_domains_from(
        &self,
        target: &str,
        start: usize,
        limit: usize,
    ) -> Result<Vec<ReferringDomain>, GatewayError> {
        let mut domains = Vec::new();

        while domains.len() < limit {
            let offset = start + domains.len();
            let page_size = PAGE_SIZE.min(limit - domains.len());
            let params = json!({
                "target": target,
                "limit": page_size,
                "offset": offset,
                "order_by": "domain_inlink_rank",
            });

            let payload = match self.gateway.get(REFDOMAINS, params).await {
                Ok(payload) => payload,
                Err(e) if !domains.is_empty() => {
                    warn!(offset, error = %e, "Referring domain paging stopped early");
                    self.gateway
                        .record_note(format!("referring domains (offset {offset}): {e}"));
                    break;
                }
                Err(e) => return Err(e),
            };

            let page = parser::parse_referring_domains(&payload);
            let short = page.len() < page_size;
            domains.extend(page);
            if short {
                break;
            }
        }

        domains.truncate(limit);
        debug!(count = domains.len(), start, "Parsed referring domains");
        Ok(domains)
    }

    /// Most common anchor texts.
    #[instrument(skip(self))]
    pub async fn anchors(&self, target: &str, limit: usize) -> Result<Vec<Anchor>, GatewayError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let payload = self
            .gateway
            .get(ANCHORS, json!({ "target": target, "limit": limit }))
            .await?;
        Ok(parser::parse_anchors(&payload))
    }

    /// Strongest individual backlinks.
    #[instrument(skip(self))]
    pub async fn top_backlinks(
        &self,
        target: &str,
        limit: usize,
    ) -> Result<Vec<Backlink>, GatewayError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let payload = self
            .gateway
            .get(TOP, json!({ "target": target, "limit": limit }))
            .await?;
        Ok(parser::parse_top_backlinks(&payload))
    }
}
