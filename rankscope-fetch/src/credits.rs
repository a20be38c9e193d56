//! Credit accounting for provider calls.
//!
//! Every endpoint is billed as a fixed per-request charge plus a per-record
//! charge. The cost for an endpoint comes from the table entry with the
//! longest pattern that occurs in the endpoint path, so
//! `/v1/domain/overview/worldwide` wins over `/v1/domain/overview`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response fields that hold the returned collection, in lookup order.
pub const COLLECTION_FIELDS: &[&str] = &[
    "data",
    "items",
    "keywords",
    "refdomains",
    "anchors",
    "backlinks",
    "distribution",
    "competitors",
    "ads",
    "prompts",
    "leaderboard",
];

// ============================================================================
// Credit Cost
// ============================================================================

/// Cost of one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCost {
    /// Fixed charge per request.
    #[serde(default)]
    pub per_request: u64,
    /// Charge per returned record.
    #[serde(default)]
    pub per_record: u64,
}

impl CreditCost {
    /// Creates a cost.
    pub const fn new(per_request: u64, per_record: u64) -> Self {
        Self {
            per_request,
            per_record,
        }
    }

    /// Total charge for a response with `records` records.
    pub fn total(&self, records: u64) -> u64 {
        self.per_request
            .saturating_add(self.per_record.saturating_mul(records))
    }
}

/// A pattern and its cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCostEntry {
    /// Substring matched against the endpoint path.
    pub pattern: String,
    /// Cost applied on match.
    #[serde(flatten)]
    pub cost: CreditCost,
}

impl CreditCostEntry {
    fn new(pattern: &str, per_request: u64, per_record: u64) -> Self {
        Self {
            pattern: pattern.to_string(),
            cost: CreditCost::new(per_request, per_record),
        }
    }
}

// ============================================================================
// Credit Cost Table
// ============================================================================

/// Pattern-matched cost table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditCostTable {
    entries: Vec<CreditCostEntry>,
}

impl CreditCostTable {
    /// Creates a table from explicit entries.
    pub fn new(entries: Vec<CreditCostEntry>) -> Self {
        Self { entries }
    }

    /// The provider's published price list.
    pub fn builtin() -> Self {
        Self::new(vec![
            CreditCostEntry::new("/v1/backlinks", 0, 1),
            CreditCostEntry::new("/v1/backlinks/summary", 100, 0),
            CreditCostEntry::new("/v1/backlinks/authority", 100, 0),
            CreditCostEntry::new("/v1/domain/overview", 100, 0),
            CreditCostEntry::new("/v1/domain/overview/worldwide", 200, 0),
            CreditCostEntry::new("/v1/domain/competitors", 0, 10),
            CreditCostEntry::new("/v1/domain/keywords", 0, 10),
            CreditCostEntry::new("/v1/domain/keywords/comparison", 0, 20),
            CreditCostEntry::new("/v1/domain/ads", 0, 10),
            CreditCostEntry::new("/v1/ai-search/prompts", 0, 50),
            CreditCostEntry::new("/v1/ai-search/leaderboard", 500, 0),
            CreditCostEntry::new("/v1/account", 0, 0),
        ])
    }

    /// Returns the builtin table with `overrides` replacing or adding entries.
    pub fn with_overrides(overrides: impl IntoIterator<Item = CreditCostEntry>) -> Self {
        let mut table = Self::builtin();
        for entry in overrides {
            match table.entries.iter_mut().find(|e| e.pattern == entry.pattern) {
                Some(existing) => existing.cost = entry.cost,
                None => table.entries.push(entry),
            }
        }
        table
    }

    /// Finds the entry with the longest pattern contained in `endpoint`.
    ///
    /// Among equally long patterns the earliest entry wins.
    pub fn lookup(&self, endpoint: &str) -> Option<&CreditCostEntry> {
        self.entries
            .iter()
            .filter(|e| endpoint.contains(e.pattern.as_str()))
            .fold(None, |best: Option<&CreditCostEntry>, e| match best {
                Some(b) if b.pattern.len() >= e.pattern.len() => Some(b),
                _ => Some(e),
            })
    }

    /// Credits charged for a call to `endpoint` returning `records` records.
    ///
    /// Unknown endpoints cost nothing.
    pub fn calculate_credits(&self, endpoint: &str, records: u64) -> u64 {
        self.lookup(endpoint).map_or(0, |e| e.cost.total(records))
    }

    /// All entries in table order.
    pub fn entries(&self) -> &[CreditCostEntry] {
        &self.entries
    }
}

impl Default for CreditCostTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Record Counting
// ============================================================================

/// Counts the records in a provider response.
///
/// A top-level array counts its elements. Otherwise the first field from
/// [`COLLECTION_FIELDS`] that holds an array gives the count. Anything else
/// counts as one record.
pub fn count_records(payload: &Value) -> u64 {
    if let Some(items) = payload.as_array() {
        return items.len() as u64;
    }
    COLLECTION_FIELDS
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_array))
        .map_or(1, |items| items.len() as u64)
}
