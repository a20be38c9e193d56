//! User settings.
//!
//! One JSON file holds everything a run needs apart from the target:
//! provider endpoint, rate limit, credit prices, report limits and an
//! optional shared API key. Missing fields take their defaults, so an
//! empty `{}` file is valid.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rankscope_fetch::{CreditCostEntry, CreditCostTable, DEFAULT_BASE_URL, GatewayConfig, RateLimitConfig};
use rankscope_report::{CredentialSource, DEFAULT_AI_ENGINES, ReportConfig};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ========================================================================
    // Provider
    // ========================================================================
    /// Provider base URL.
    pub api_base_url: String,

    /// Hosts the HTTP client may contact. Empty means any.
    pub allowed_hosts: Vec<String>,

    /// Token bucket parameters.
    pub rate_limit: RateLimitConfig,

    /// Keep a per-call log in each report.
    pub call_logging: bool,

    /// Per-request timeout.
    pub request_timeout_secs: u64,

    /// Fallback API key used when neither the caller nor the environment
    /// supplies one.
    pub shared_api_key: Option<String>,

    /// Replacement or additional credit prices, merged over the built-in
    /// table by pattern.
    pub credit_costs: Option<Vec<CreditCostEntry>>,

    // ========================================================================
    // Report
    // ========================================================================
    /// Market used when the worldwide breakdown is empty.
    pub default_market: String,

    /// Competitors analysed when none are named.
    pub max_competitors: usize,

    /// Ranked keywords fetched for the target.
    pub ranked_keyword_limit: usize,

    /// Keyword gaps kept.
    pub gap_limit: usize,

    /// Keyword overlaps kept.
    pub overlap_limit: usize,

    /// Backlink gaps kept.
    pub backlink_gap_limit: usize,

    /// Prompts kept per AI engine.
    pub prompts_per_engine: usize,

    /// AI engines queried.
    pub ai_engines: Vec<String>,

    /// How long stored reports are served.
    pub report_ttl_hours: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let report = ReportConfig::default();
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            allowed_hosts: Vec::new(),
            rate_limit: RateLimitConfig::default(),
            call_logging: true,
            request_timeout_secs: 30,
            shared_api_key: None,
            credit_costs: None,

            default_market: report.default_market,
            max_competitors: report.max_competitors,
            ranked_keyword_limit: report.ranked_keyword_limit,
            gap_limit: report.gap_limit,
            overlap_limit: report.overlap_limit,
            backlink_gap_limit: report.backlink_gap_limit,
            prompts_per_engine: report.prompts_per_engine,
            ai_engines: DEFAULT_AI_ENGINES.iter().map(ToString::to_string).collect(),
            report_ttl_hours: 168,
        }
    }
}

impl Settings {
    /// The credit table: built-in prices with any configured overrides.
    pub fn credit_table(&self) -> CreditCostTable {
        match &self.credit_costs {
            Some(overrides) => CreditCostTable::with_overrides(overrides.iter().cloned()),
            None => CreditCostTable::builtin(),
        }
    }

    /// Gateway configuration for a run.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.api_base_url.clone(),
            rate_limit: self.rate_limit,
            call_logging: self.call_logging,
            credit_costs: self.credit_table(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            allowed_hosts: self.allowed_hosts.clone(),
        }
    }

    /// Report configuration for a run.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            default_market: self.default_market.clone(),
            max_competitors: self.max_competitors,
            ranked_keyword_limit: self.ranked_keyword_limit,
            gap_limit: self.gap_limit,
            overlap_limit: self.overlap_limit,
            backlink_gap_limit: self.backlink_gap_limit,
            prompts_per_engine: self.prompts_per_engine,
            ai_engines: self.ai_engines.clone(),
            report_ttl: chrono::Duration::hours(i64::from(self.report_ttl_hours)),
            ..ReportConfig::default()
        }
    }

    /// Credential candidates: `caller`, then the environment, then the
    /// shared key.
    pub fn credential_source(&self, caller: Option<String>) -> CredentialSource {
        CredentialSource::new()
            .caller(caller)
            .from_env()
            .shared(self.shared_api_key.clone())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_base_url", &self.api_base_url)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("rate_limit", &self.rate_limit)
            .field("call_logging", &self.call_logging)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("shared_api_key", &self.shared_api_key.as_ref().map(|_| "<redacted>"))
            .field("credit_costs", &self.credit_costs)
            .field("default_market", &self.default_market)
            .field("max_competitors", &self.max_competitors)
            .field("report_ttl_hours", &self.report_ttl_hours)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings plus the file they live in.
pub struct SettingsStore {
    settings: RwLock<Settings>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults for `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from `path`. A missing or invalid file yields defaults.
    pub async fn load(path: PathBuf) -> Self {
        let settings: Settings = load_json_or_default(&path).await;
        debug!(path = %path.display(), "Settings loaded");
        Self {
            settings: RwLock::new(settings),
            path,
        }
    }

    /// The settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
