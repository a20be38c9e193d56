// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `RankScope` Core
//!
//! Core types, models, and traits for the `RankScope` report engine.
//!
//! This crate provides the foundational value types shared by every other
//! `RankScope` crate:
//!
//! - Normalized metric records (one group per provider endpoint family)
//! - Cross-competitor aggregate records
//! - The terminal [`Report`] and its lifecycle types
//! - The [`ReportStore`] persistence contract
//!
//! ## Key Types
//!
//! ### Metrics
//! - [`BacklinksSummary`], [`AuthorityDistribution`], [`ReferringDomain`]
//! - [`DomainOverview`], [`WorldwideOverview`], [`PositionDistribution`]
//! - [`RankedKeyword`], [`ComparedKeyword`]
//! - [`AiPrompt`], [`LeaderboardEntry`]
//! - [`AdsSummary`]
//!
//! ### Aggregates
//! - [`AggregatedKeywordGap`], [`AggregatedKeywordOverlap`], [`AggregatedBacklinkGap`]
//! - [`CompetitorAnalysis`]
//!
//! ### Report
//! - [`Report`] - The compiled report
//! - [`ReportStatus`] - Run lifecycle state
//! - [`StoredReport`] - What the persistence collaborator keeps
//! - [`CallLogEntry`] - One provider call, for developer diagnostics

pub mod models;
pub mod traits;

// Re-export all model types
pub use models::{
    // Diagnostics
    CallLogEntry,
    HttpMethod,
    // Backlinks
    AUTHORITY_BUCKETS,
    Anchor,
    AuthorityBucket,
    AuthorityDistribution,
    Backlink,
    BacklinksSummary,
    ReferringDomain,
    // Overview
    Competitor,
    CountryMetrics,
    DomainOverview,
    PositionChanges,
    PositionDistribution,
    TrafficMetrics,
    WorldwideOverview,
    // Keywords
    ComparedKeyword,
    RankedKeyword,
    // AI search
    AiPrompt,
    LeaderboardEntry,
    PromptClassification,
    // Ads
    AdsSummary,
    PaidAd,
    // Aggregates
    AggregatedBacklinkGap,
    AggregatedKeywordGap,
    AggregatedKeywordOverlap,
    CompetitorAnalysis,
    CompetitorAnalysisSummary,
    CompetitorBacklinks,
    CompetitorPosition,
    // Report
    AiSearchSection,
    BacklinksSection,
    CompetitorsSection,
    Diagnostics,
    DistributionSource,
    ExecutiveSummary,
    KeywordsSection,
    OverviewSection,
    QuickWin,
    QuickWinKind,
    Report,
    ReportStatus,
    StoredReport,
};

// Re-export traits
pub use traits::ReportStore;
