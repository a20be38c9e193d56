//! JSON output formatting.

use anyhow::Result;
use rankscope_fetch::CreditCostEntry;
use rankscope_metrics::AccountBalance;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the credits command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<&'a AccountBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_error: Option<String>,
    pub prices: Vec<PriceOutput<'a>>,
}

/// One credit price.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOutput<'a> {
    pub pattern: &'a str,
    pub per_request: u64,
    pub per_record: u64,
}

impl<'a> From<&'a CreditCostEntry> for PriceOutput<'a> {
    fn from(entry: &'a CreditCostEntry) -> Self {
        Self {
            pattern: &entry.pattern,
            per_request: entry.cost.per_request,
            per_record: entry.cost.per_record,
        }
    }
}

/// JSON output for `config path`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsOutput {
    pub config_dir: String,
    pub settings_file: String,
    pub reports_dir: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the credit prices and the balance, or why it is missing.
    pub fn format_credits(
        &self,
        entries: &[CreditCostEntry],
        balance: Result<&AccountBalance, &str>,
    ) -> Result<String> {
        let (balance, balance_error) = match balance {
            Ok(balance) => (Some(balance), None),
            Err(reason) => (None, Some(reason.to_string())),
        };
        self.format(&CreditsOutput {
            balance,
            balance_error,
            prices: entries.iter().map(PriceOutput::from).collect(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_price_output_flattens_cost() {
        let entry: CreditCostEntry =
            serde_json::from_str(r#"{"pattern": "/v1/keywords", "per_record": 2}"#).unwrap();
        let value = serde_json::to_value(PriceOutput::from(&entry)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"pattern": "/v1/keywords", "perRequest": 0, "perRecord": 2})
        );
    }
}
