//! Paid ads fetcher.

use rankscope_core::AdsSummary;
use rankscope_fetch::{Gateway, GatewayError};
use serde_json::json;
use tracing::instrument;

use super::parser;

const ADS: &str = "/v1/domain/ads";

/// Fetches and normalizes paid search ads.
#[derive(Debug, Clone, Copy)]
pub struct AdsFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> AdsFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Ads shown for `domain` in `market`.
    #[instrument(skip(self))]
    pub async fn ads(
        &self,
        domain: &str,
        market: &str,
        limit: usize,
    ) -> Result<AdsSummary, GatewayError> {
        if limit == 0 {
            return Ok(AdsSummary::default());
        }
        let payload = self
            .gateway
            .get(ADS, json!({ "domain": domain, "source": market, "limit": limit }))
            .await?;
        Ok(parser::parse_ads(&payload))
    }
}
