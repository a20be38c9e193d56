//! Domain overview fetcher.

use rankscope_core::{Competitor, DomainOverview, WorldwideOverview};
use rankscope_fetch::{Gateway, GatewayError};
use serde_json::json;
use tracing::{debug, instrument};

use super::parser;

const WORLDWIDE: &str = "/v1/domain/overview/worldwide";
const OVERVIEW: &str = "/v1/domain/overview";
const COMPETITORS: &str = "/v1/domain/competitors";

/// Fetches and normalizes domain-level traffic overviews.
#[derive(Debug, Clone, Copy)]
pub struct OverviewFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> OverviewFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Per-country breakdown plus global position changes.
    #[instrument(skip(self))]
    pub async fn worldwide(&self, domain: &str) -> Result<WorldwideOverview, GatewayError> {
        let payload = self.gateway.get(WORLDWIDE, json!({ "domain": domain })).await?;
        let overview = parser::parse_worldwide(&payload);
        debug!(countries = overview.countries.len(), "Parsed worldwide overview");
        Ok(overview)
    }

    /// Overview for one market.
    #[instrument(skip(self))]
    pub async fn market(&self, domain: &str, market: &str) -> Result<DomainOverview, GatewayError> {
        let payload = self
            .gateway
            .get(OVERVIEW, json!({ "domain": domain, "source": market }))
            .await?;
        Ok(parser::parse_market_overview(&payload, market))
    }

    /// Organic competitors in one market, strongest first.
    #[instrument(skip(self))]
    pub async fn competitors(
        &self,
        domain: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<Competitor>, GatewayError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let payload = self
            .gateway
            .get(
                COMPETITORS,
                json!({ "domain": domain, "source": market, "limit": limit }),
            )
            .await?;
        Ok(parser::parse_competitors(&payload))
    }
}
