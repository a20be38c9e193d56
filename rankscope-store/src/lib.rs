// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # RankScope Store
//!
//! Everything that touches the disk.
//!
//! This crate provides:
//!
//! - **Settings / SettingsStore**: the JSON settings file and its conversion
//!   into `GatewayConfig`, `ReportConfig` and a `CredentialSource`
//! - **MemoryReportStore / FileReportStore**: `ReportStore` implementations
//!   that refuse to serve expired records
//! - **Persistence**: atomic, owner-only JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use rankscope_store::{FileReportStore, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await.get().await;
//! let generator = ReportGenerator::new(settings.gateway_config(), settings.report_config());
//! let store = FileReportStore::default_location();
//! generator.generate_and_store(&request, &settings.credential_source(None), &progress, &store).await?;
//! ```

pub mod error;
pub mod persistence;
pub mod report_store;
pub mod settings_store;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_data_dir, default_reports_dir, default_settings_path, ensure_dir,
    load_json, load_json_or_default, save_json,
};
pub use report_store::{FileReportStore, MemoryReportStore, load_required};
pub use settings_store::{Settings, SettingsStore};
