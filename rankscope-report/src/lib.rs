// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # RankScope Report
//!
//! Turns provider metrics into a consolidated report.
//!
//! ## Pipeline
//!
//! ```text
//! ReportGenerator::generate
//!   ├─ resolve credential, normalize target, build Gateway   (fatal on failure)
//!   ├─ phase 1  worldwide overview, backlinks summary
//!   ├─ phase 2  market overview, ranked keywords, competitors, ads
//!   ├─ phase 3  authority, referring domains, anchors, top backlinks
//!   ├─ phase 4  analyze_competitors  → keyword gaps / overlaps, backlink gaps
//!   ├─ phase 5  AI prompts per engine → deduplicate_prompts; leaderboard
//!   └─ phase 6  compile
//! ```
//!
//! Each fetch inside a phase is wrapped in `with_default`: a failure costs
//! the report that one section and leaves a note in the diagnostics.
//!
//! ## Usage
//!
//! ```ignore
//! use rankscope_report::{CredentialSource, Progress, ReportConfig, ReportGenerator, ReportRequest};
//!
//! let generator = ReportGenerator::new(GatewayConfig::default(), ReportConfig::default());
//! let (progress, mut events) = Progress::with_events();
//! let report = generator
//!     .generate(&ReportRequest::new("example.com"), &CredentialSource::new().from_env(), &progress)
//!     .await?;
//! ```

pub mod aggregate;
pub mod compiler;
pub mod config;
pub mod credentials;
pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod prompts;
pub mod target;

pub use aggregate::{
    CompetitorKeywords, CompetitorLimits, CompetitorReferringDomains, aggregate_backlink_gaps,
    aggregate_keyword_gaps, aggregate_keyword_overlaps, analyze_competitors,
};
pub use compiler::{CompilerInput, compile};
pub use config::{DEFAULT_AI_ENGINES, ReportConfig};
pub use credentials::{API_KEY_ENV, Credential, CredentialOrigin, CredentialSource};
pub use error::ReportError;
pub use orchestrator::{ReportGenerator, ReportRequest};
pub use progress::{PHASE_COUNT, Progress, ProgressEvent};
pub use prompts::{EnginePrompts, deduplicate_prompts};
pub use target::{derive_brand, normalize_domain};
