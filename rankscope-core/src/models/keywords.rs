//! Keyword records.

use serde::{Deserialize, Serialize};

/// A keyword the analysed domain ranks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedKeyword {
    /// Keyword text.
    pub keyword: String,
    /// Current position (0 = unknown).
    pub position: u32,
    /// Previous position (0 = not ranking before).
    pub previous_position: u32,
    /// Monthly search volume.
    pub volume: u64,
    /// Keyword difficulty (0-100).
    pub difficulty: u32,
    /// Cost per click.
    pub cpc: f64,
    /// Estimated traffic from this keyword.
    pub traffic: u64,
    /// Ranking URL.
    pub url: String,
}

impl RankedKeyword {
    /// Returns true if the keyword ranks on page two (positions 11-20).
    pub fn is_near_page_one(&self) -> bool {
        (11..=20).contains(&self.position)
    }
}

/// A keyword from a two-domain comparison.
///
/// `position` belongs to the compared-from domain (the competitor);
/// `compare_position` belongs to the compared-to domain (us), 0 when we do
/// not rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedKeyword {
    /// Keyword text.
    pub keyword: String,
    /// Monthly search volume.
    pub volume: u64,
    /// Keyword difficulty (0-100).
    pub difficulty: u32,
    /// Competitor position.
    pub position: u32,
    /// Our position.
    pub compare_position: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_page_one() {
        let mut kw = RankedKeyword::default();
        for (pos, expected) in [(10, false), (11, true), (20, true), (21, false), (0, false)] {
            kw.position = pos;
            assert_eq!(kw.is_near_page_one(), expected, "position {pos}");
        }
    }
}
