//! AI search visibility records.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Prompt Classification
// ============================================================================

/// Why a prompt is associated with the analysed site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptClassification {
    /// The answer mentions the brand.
    #[default]
    Brand,
    /// The answer links to the target domain.
    Link,
    /// The answer both mentions the brand and links to the domain.
    BrandLink,
}

impl PromptClassification {
    /// Parses a provider type string. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brand" | "mention" => Some(Self::Brand),
            "link" | "url" => Some(Self::Link),
            "brand_link" | "brand-link" | "brandlink" => Some(Self::BrandLink),
            _ => None,
        }
    }

    /// True for `brand` and `brand_link`.
    pub fn has_brand(self) -> bool {
        matches!(self, Self::Brand | Self::BrandLink)
    }

    /// True for `link` and `brand_link`.
    pub fn has_link(self) -> bool {
        matches!(self, Self::Link | Self::BrandLink)
    }

    /// Resolves the classification of a duplicate prompt.
    ///
    /// One brand-side and one link-side classification combine into
    /// `brand_link`; anything else keeps `self`. The result never loses a
    /// side, so repeated merging is monotonic.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if (self.has_brand() && other.has_link()) || (self.has_link() && other.has_brand()) {
            Self::BrandLink
        } else {
            self
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Link => "link",
            Self::BrandLink => "brand_link",
        }
    }
}

impl fmt::Display for PromptClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Prompts & Leaderboard
// ============================================================================

/// A prompt for which an AI engine surfaced the brand or domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPrompt {
    /// Prompt text as reported.
    pub prompt: String,
    /// Engine identifier (e.g. `chatgpt`).
    pub engine: String,
    /// Brand/link classification.
    pub classification: PromptClassification,
    /// Rank of the brand/domain in the answer.
    pub rank: u32,
    /// Estimated prompt volume.
    pub volume: Option<u64>,
    /// Answer snippet.
    pub snippet: Option<String>,
    /// Sources cited by the answer.
    pub sources: Option<Vec<String>>,
}

impl AiPrompt {
    /// Deduplication key: engine plus lower-cased prompt text.
    pub fn dedup_key(&self) -> (String, String) {
        (self.engine.clone(), self.prompt.to_lowercase())
    }
}

/// One row of the AI share-of-voice leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Domain.
    pub domain: String,
    /// Brand name.
    pub brand: String,
    /// Share of voice, percent.
    pub share_of_voice: f64,
    /// Mentions across engines.
    pub mentions: u64,
    /// Whether this row is the analysed target.
    pub is_primary: bool,
}
