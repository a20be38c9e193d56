//! AI search fetcher.

use rankscope_core::{AiPrompt, LeaderboardEntry, PromptClassification};
use rankscope_fetch::{Gateway, GatewayError};
use serde_json::json;
use tracing::instrument;

use super::parser;

const PROMPTS: &str = "/v1/ai-search/prompts";
const LEADERBOARD: &str = "/v1/ai-search/leaderboard";

/// The angle a prompt listing is queried from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptScope<'s> {
    /// Prompts whose answers mention the brand.
    Brand(&'s str),
    /// Prompts whose answers link to the domain.
    Target(&'s str),
}

impl PromptScope<'_> {
    fn param(&self) -> (&'static str, &str) {
        match self {
            Self::Brand(brand) => ("brand", brand),
            Self::Target(target) => ("target", target),
        }
    }

    fn implied_classification(&self) -> PromptClassification {
        match self {
            Self::Brand(_) => PromptClassification::Brand,
            Self::Target(_) => PromptClassification::Link,
        }
    }
}

/// Fetches and normalizes AI search visibility.
#[derive(Debug, Clone, Copy)]
pub struct AiSearchFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> AiSearchFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Prompts on `engine` surfacing the brand or the domain.
    #[instrument(skip(self))]
    pub async fn prompts(
        &self,
        engine: &str,
        scope: PromptScope<'_>,
        limit: usize,
    ) -> Result<Vec<AiPrompt>, GatewayError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let (key, value) = scope.param();
        let mut params = json!({ "engine": engine, "limit": limit });
        params[key] = json!(value);

        let payload = self.gateway.get(PROMPTS, params).await?;
        Ok(parser::parse_prompts(
            &payload,
            engine,
            scope.implied_classification(),
        ))
    }

    /// Share-of-voice leaderboard for the target and its rivals.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        target: &str,
        brand: &str,
        market: &str,
    ) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let payload = self
            .gateway
            .get(
                LEADERBOARD,
                json!({ "target": target, "brand": brand, "source": market }),
            )
            .await?;
        Ok(parser::parse_leaderboard(&payload))
    }
}
