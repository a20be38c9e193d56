//! AI prompt deduplication.
//!
//! Prompt listings come from two angles per engine: brand-scoped first,
//! then target-scoped. Within an engine, prompts with the same text
//! (ignoring case) collapse into one entry whose classification becomes
//! `brand_link` once both a brand-side and a link-side listing have been
//! seen. The first spelling and the first row's metrics are kept.

use std::collections::HashMap;

use rankscope_core::AiPrompt;

/// Prompt listings for one engine, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnginePrompts {
    /// Engine identifier.
    pub engine: String,
    /// Brand-scoped listing.
    pub brand: Vec<AiPrompt>,
    /// Target-scoped listing.
    pub target: Vec<AiPrompt>,
}

/// Folds one engine's listings into a deduplicated list, sorted by volume
/// (missing volume counts as 0) and capped at `cap`.
pub fn merge_engine(listing: EnginePrompts, cap: usize) -> Vec<AiPrompt> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<AiPrompt> = Vec::new();

    for mut prompt in listing.brand.into_iter().chain(listing.target) {
        prompt.engine.clone_from(&listing.engine);
        let (_, key) = prompt.dedup_key();
        match index.get(&key) {
            Some(&i) => {
                let existing = &mut merged[i];
                existing.classification = existing.classification.merge(prompt.classification);
            }
            None => {
                index.insert(key, merged.len());
                merged.push(prompt);
            }
        }
    }

    merged.sort_by(|a, b| b.volume.unwrap_or(0).cmp(&a.volume.unwrap_or(0)));
    merged.truncate(cap);
    merged
}

/// Deduplicates every engine and concatenates the results in engine order.
pub fn deduplicate_prompts(listings: Vec<EnginePrompts>, per_engine: usize) -> Vec<AiPrompt> {
    listings
        .into_iter()
        .flat_map(|listing| merge_engine(listing, per_engine))
        .collect()
}
