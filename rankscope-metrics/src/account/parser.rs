//! Account balance parser.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::normalize;

/// Remaining provider credits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Credits left on the account.
    #[serde(default, deserialize_with = "lenient::u64")]
    pub credits: u64,
    /// Plan name, empty when unknown.
    #[serde(default, deserialize_with = "lenient::string")]
    pub plan: String,
}

/// Parses `/v1/account/balance`.
pub fn parse_balance(payload: &Value) -> AccountBalance {
    normalize::object(payload, "account balance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_balance() {
        let balance = parse_balance(&json!({"credits": "250000", "plan": "Business"}));
        assert_eq!(balance.credits, 250_000);
        assert_eq!(balance.plan, "Business");
        assert_eq!(parse_balance(&json!(null)), AccountBalance::default());
    }
}
