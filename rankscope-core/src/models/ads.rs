//! Paid search records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A paid search ad shown for the analysed domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaidAd {
    /// Keyword the ad was shown for.
    pub keyword: String,
    /// Ad position.
    pub position: u32,
    /// Ad headline.
    pub title: String,
    /// Ad body text.
    pub text: String,
    /// Landing URL.
    pub url: String,
    /// Keyword monthly search volume.
    pub volume: u64,
    /// Cost per click.
    pub cpc: f64,
}

/// Paid search summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdsSummary {
    /// Ads returned by the provider.
    pub total_ads: u64,
    /// Distinct keywords with ads (case-insensitive).
    pub keywords: u64,
    /// The ads themselves.
    pub ads: Vec<PaidAd>,
}

impl AdsSummary {
    /// Builds a summary from a list of ads.
    pub fn from_ads(ads: Vec<PaidAd>) -> Self {
        let seen: HashSet<String> = ads.iter().map(|ad| ad.keyword.to_lowercase()).collect();
        Self {
            total_ads: ads.len() as u64,
            keywords: seen.len() as u64,
            ads,
        }
    }
}
