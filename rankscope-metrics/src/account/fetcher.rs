//! Account fetcher.

use rankscope_fetch::{Gateway, GatewayError};
use serde_json::Value;
use tracing::{info, instrument};

use super::parser::{AccountBalance, parse_balance};

const BALANCE: &str = "/v1/account/balance";

/// Fetches the account's remaining credits.
#[derive(Debug, Clone, Copy)]
pub struct AccountFetcher<'a> {
    gateway: &'a Gateway,
}

impl<'a> AccountFetcher<'a> {
    /// Creates a fetcher that calls through `gateway`.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Current balance.
    #[instrument(skip(self))]
    pub async fn balance(&self) -> Result<AccountBalance, GatewayError> {
        let payload = self.gateway.get(BALANCE, Value::Null).await?;
        let balance = parse_balance(&payload);
        info!(credits = balance.credits, "Fetched account balance");
        Ok(balance)
    }
}
