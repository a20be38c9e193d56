//! AI search payload parsers.

use rankscope_core::{AiPrompt, LeaderboardEntry, PromptClassification};
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PromptRow {
    #[serde(deserialize_with = "lenient::string")]
    prompt: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    kind: String,
    #[serde(deserialize_with = "lenient::u32")]
    rank: u32,
    #[serde(deserialize_with = "lenient::opt_u64")]
    volume: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    snippet: Option<String>,
    #[serde(deserialize_with = "lenient::opt_strings")]
    sources: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LeaderboardRow {
    #[serde(deserialize_with = "lenient::string")]
    domain: String,
    #[serde(deserialize_with = "lenient::string")]
    brand: String,
    #[serde(deserialize_with = "lenient::f64")]
    share_of_voice: f64,
    #[serde(deserialize_with = "lenient::u64")]
    mentions: u64,
    #[serde(deserialize_with = "lenient::bool")]
    is_primary: bool,
}

/// Parses a prompt listing for `engine`.
///
/// Rows with a missing or unknown `type` take `fallback`, the
/// classification implied by how the listing was queried. Rows without
/// prompt text are dropped.
pub fn parse_prompts(
    payload: &Value,
    engine: &str,
    fallback: PromptClassification,
) -> Vec<AiPrompt> {
    let rows: Vec<PromptRow> = lenient::records(lenient::rows(payload, "prompts"));
    rows.into_iter()
        .filter(|r| !r.prompt.trim().is_empty())
        .map(|r| AiPrompt {
            prompt: r.prompt,
            engine: engine.to_string(),
            classification: PromptClassification::parse(&r.kind).unwrap_or(fallback),
            rank: r.rank,
            volume: r.volume,
            snippet: r.snippet,
            sources: r.sources,
        })
        .collect()
}

/// Parses the share-of-voice leaderboard.
pub fn parse_leaderboard(payload: &Value) -> Vec<LeaderboardEntry> {
    let rows: Vec<LeaderboardRow> = lenient::records(lenient::rows(payload, "leaderboard"));
    rows.into_iter()
        .filter(|r| !r.domain.is_empty() || !r.brand.is_empty())
        .map(|r| LeaderboardEntry {
            domain: r.domain,
            brand: r.brand,
            share_of_voice: r.share_of_voice,
            mentions: r.mentions,
            is_primary: r.is_primary,
        })
        .collect()
}
