//! Report orchestration.
//!
//! [`ReportGenerator`] drives one report run through six phases. Phases run
//! strictly in order; the fetches inside a phase run concurrently and each
//! one degrades to its default on failure. Only a missing credential, an
//! invalid target or a panic in the orchestrator itself fail the run.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use futures::future::join_all;
use rankscope_core::{
    Competitor, DomainOverview, ReferringDomain, Report, ReportStore, StoredReport,
    WorldwideOverview,
};
use rankscope_fetch::{Gateway, GatewayConfig, Transport, or_default, with_default};
use rankscope_metrics::{
    AdsFetcher, AiSearchFetcher, BacklinksFetcher, KeywordsFetcher, OverviewFetcher, PromptScope,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::aggregate::{CompetitorLimits, analyze_competitors};
use crate::compiler::{CompilerInput, compile};
use crate::config::ReportConfig;
use crate::credentials::CredentialSource;
use crate::error::ReportError;
use crate::progress::Progress;
use crate::prompts::{EnginePrompts, deduplicate_prompts};
use crate::target::{derive_brand, normalize_domain};

// ============================================================================
// Request
// ============================================================================

/// What to report on.
#[derive(Clone, Default)]
pub struct ReportRequest {
    /// Report identifier.
    pub id: String,
    /// Target domain, as entered.
    pub domain: String,
    /// Brand name. Derived from the domain when absent.
    pub brand: Option<String>,
    /// Market to analyse. The top market when absent.
    pub market: Option<String>,
    /// Competitors to compare against. Discovered when empty.
    pub competitors: Vec<String>,
    /// Caller-supplied API key.
    pub api_key: Option<String>,
}

impl ReportRequest {
    /// A request for `domain` with a fresh id.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Sets the report id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the brand name.
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Pins the market.
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Names the competitors.
    pub fn competitors<I, S>(mut self, competitors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.competitors = competitors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the caller-supplied API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl fmt::Debug for ReportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRequest")
            .field("id", &self.id)
            .field("domain", &self.domain)
            .field("brand", &self.brand)
            .field("market", &self.market)
            .field("competitors", &self.competitors)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// Selection helpers
// ============================================================================

/// The market to analyse: the caller's choice, else the country with the
/// most organic traffic, else `fallback`.
pub fn select_market(pinned: Option<&str>, worldwide: &WorldwideOverview, fallback: &str) -> String {
    pinned
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_lowercase)
        .or_else(|| worldwide.top_market().map(|c| c.country.clone()))
        .unwrap_or_else(|| fallback.to_string())
}

/// Competitors to analyse.
///
/// Caller-named competitors win. Otherwise the first `max` discovered
/// domains are taken. The target itself and duplicates are always dropped.
pub fn select_competitors(
    target: &str,
    named: &[String],
    discovered: &[Competitor],
    max: usize,
) -> Vec<String> {
    let mut seen = HashSet::from([target.to_string()]);
    let mut keep = |domain: String| seen.insert(domain.clone()).then_some(domain);

    if named.is_empty() {
        discovered
            .iter()
            .filter_map(|c| normalize_domain(&c.domain).ok())
            .filter_map(&mut keep)
            .take(max)
            .collect()
    } else {
        named
            .iter()
            .filter_map(|name| match normalize_domain(name) {
                Ok(domain) => Some(domain),
                Err(e) => {
                    warn!(competitor = %name, error = %e, "Ignoring invalid competitor");
                    None
                }
            })
            .filter_map(&mut keep)
            .collect()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Runs report generation.
pub struct ReportGenerator {
    gateway_config: GatewayConfig,
    config: ReportConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ReportGenerator {
    /// Creates a generator.
    pub fn new(gateway_config: GatewayConfig, config: ReportConfig) -> Self {
        Self {
            gateway_config,
            config,
            transport: None,
        }
    }

    /// Routes provider traffic through `transport` instead of HTTP.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Run configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generates one report.
    ///
    /// `request.api_key`, when set, takes the caller slot of `credentials`.
    /// Progress and the final status are published on `progress`.
    pub async fn generate(
        &self,
        request: &ReportRequest,
        credentials: &CredentialSource,
        progress: &Progress,
    ) -> Result<Report, ReportError> {
        let run = AssertUnwindSafe(self.run(request, credentials, progress));
        let result = match run.catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(ReportError::Internal(panic_message(panic.as_ref()))),
        };

        match &result {
            Ok(_) => progress.complete(),
            Err(e) => {
                error!(report = %request.id, error = %e, "Report generation failed");
                progress.fail(e.to_string());
            }
        }
        result
    }

    /// Generates a report and hands the record to `store`.
    ///
    /// Failed runs are stored too, with their error message.
    pub async fn generate_and_store<S: ReportStore>(
        &self,
        request: &ReportRequest,
        credentials: &CredentialSource,
        progress: &Progress,
        store: &S,
    ) -> Result<Report, ReportError> {
        let created_at = Utc::now();
        let result = self.generate(request, credentials, progress).await;
        let expires_at = Utc::now() + self.config.report_ttl;

        let record = match &result {
            Ok(report) => StoredReport::completed(report.clone(), expires_at),
            Err(e) => StoredReport::failed(
                request.id.clone(),
                request.domain.clone(),
                e.to_string(),
                created_at,
                expires_at,
            ),
        };
        store
            .save(&request.id, &record)
            .await
            .map_err(|e| ReportError::Store(e.to_string()))?;
        result
    }

    #[instrument(skip(self, request, credentials, progress), fields(report = %request.id))]
    async fn run(
        &self,
        request: &ReportRequest,
        credentials: &CredentialSource,
        progress: &Progress,
    ) -> Result<Report, ReportError> {
        let source = match &request.api_key {
            Some(key) => credentials.clone().caller(Some(key.clone())),
            None => credentials.clone(),
        };
        let credential = source.resolve()?;
        debug!(origin = %credential.origin(), "Resolved API key");

        let domain = normalize_domain(&request.domain)?;
        let brand = request
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map_or_else(|| derive_brand(&domain), str::to_string);

        let mut builder = Gateway::builder()
            .config(self.gateway_config.clone())
            .api_key(credential.key());
        if let Some(transport) = &self.transport {
            builder = builder.transport(Arc::clone(transport));
        }
        let gateway = builder
            .build()
            .map_err(|e| ReportError::FatalConfiguration(e.to_string()))?;

        info!(domain = %domain, brand = %brand, "Generating report");
        let cfg = &self.config;
        let overview = OverviewFetcher::new(&gateway);
        let keywords = KeywordsFetcher::new(&gateway);
        let backlinks = BacklinksFetcher::new(&gateway);
        let paid = AdsFetcher::new(&gateway);

        // Phase 1
        progress.phase(1, "Fetching domain overview", 5);
        let (worldwide, backlinks_summary) = tokio::join!(
            or_default(&gateway, "worldwide overview", overview.worldwide(&domain)),
            or_default(&gateway, "backlinks summary", backlinks.summary(&domain)),
        );
        let market = select_market(request.market.as_deref(), &worldwide, &cfg.default_market);

        // Phase 2
        progress.phase(2, format!("Analyzing keywords in {market}"), 20);
        let (market_overview, ranked, discovered, ads) = tokio::join!(
            with_default(
                &gateway,
                "market overview",
                overview.market(&domain, &market),
                DomainOverview {
                    market: market.clone(),
                    ..Default::default()
                },
            ),
            or_default(
                &gateway,
                "ranked keywords",
                keywords.ranked(&domain, &market, cfg.ranked_keyword_limit),
            ),
            or_default(
                &gateway,
                "competitors",
                overview.competitors(&domain, &market, cfg.competitor_candidates),
            ),
            or_default(
                &gateway,
                "paid ads",
                paid.ads(&domain, &market, cfg.ads_limit),
            ),
        );
        let competitors =
            select_competitors(&domain, &request.competitors, &discovered, cfg.max_competitors);
        debug!(?competitors, "Selected competitors");

        // Phase 3
        progress.phase(3, "Analyzing backlink profile", 40);
        let (authority, referring_domains, anchors, top_backlinks) = tokio::join!(
            or_default(
                &gateway,
                "authority distribution",
                backlinks.authority(&domain),
            ),
            or_default(
                &gateway,
                "referring domains",
                backlinks.referring_domains(&domain, cfg.referring_domain_limit),
            ),
            or_default(&gateway, "anchors", backlinks.anchors(&domain, cfg.anchor_limit)),
            or_default(
                &gateway,
                "top backlinks",
                backlinks.top_backlinks(&domain, cfg.top_backlink_limit),
            ),
        );

        // Phase 4
        progress.phase(4, "Comparing competitors", 55);
        let ours = if competitors.is_empty() {
            Vec::new()
        } else {
            exclusion_domains(
                &gateway,
                &backlinks,
                &domain,
                backlinks_summary.refdomains,
                &referring_domains,
                cfg,
            )
            .await
        };
        let limits = CompetitorLimits {
            gap_limit: cfg.gap_limit,
            overlap_limit: cfg.overlap_limit,
            backlink_gap_limit: cfg.backlink_gap_limit,
            referring_domain_limit: cfg.referring_domain_limit,
        };
        let analysis = analyze_competitors(
            &gateway,
            &domain,
            &market,
            &competitors,
            &ours,
            &limits,
        )
        .await;

        // Phase 5
        progress.phase(5, "Checking AI search visibility", 75);
        let ai = AiSearchFetcher::new(&gateway);
        let per_engine = cfg.ai_engines.iter().map(|engine| {
            let gateway = &gateway;
            let brand = brand.as_str();
            let domain = domain.as_str();
            async move {
                let brand_label = format!("AI prompts ({engine}, brand)");
                let brand_prompts = or_default(
                    gateway,
                    &brand_label,
                    ai.prompts(engine, PromptScope::Brand(brand), cfg.prompts_per_engine),
                )
                .await;
                let target_label = format!("AI prompts ({engine}, target)");
                let target_prompts = or_default(
                    gateway,
                    &target_label,
                    ai.prompts(engine, PromptScope::Target(domain), cfg.prompts_per_engine),
                )
                .await;
                EnginePrompts {
                    engine: engine.clone(),
                    brand: brand_prompts,
                    target: target_prompts,
                }
            }
        });
        let (listings, leaderboard) = tokio::join!(
            join_all(per_engine),
            or_default(&gateway, "AI leaderboard", ai.leaderboard(&domain, &brand, &market)),
        );
        let prompts = deduplicate_prompts(listings, cfg.prompts_per_engine);

        // Phase 6
        progress.phase(6, "Compiling report", 95);
        let report = compile(CompilerInput {
            id: request.id.clone(),
            domain,
            brand,
            market,
            generated_at: Utc::now(),
            worldwide,
            market_overview,
            keywords: ranked,
            backlinks_summary,
            authority,
            referring_domains,
            anchors,
            top_backlinks,
            discovered_competitors: discovered,
            analysis,
            engines: cfg.ai_engines.clone(),
            prompts,
            leaderboard,
            ads,
            diagnostics: gateway.diagnostics(),
        });

        info!(
            calls = report.diagnostics.call_count,
            credits = report.diagnostics.total_credits,
            degraded = report.diagnostics.notes.len(),
            "Report compiled"
        );
        Ok(report)
    }
}

/// The target's referring domains for backlink-gap exclusion.
///
/// Starts from the page already fetched for the report. When that page was
/// full, the rest is paged in up to the summary's refdomain count, or up to
/// `exclusion_domain_limit` when the count is unknown.
async fn exclusion_domains(
    gateway: &Gateway,
    backlinks: &BacklinksFetcher<'_>,
    domain: &str,
    known: u64,
    fetched: &[ReferringDomain],
    cfg: &ReportConfig,
) -> Vec<ReferringDomain> {
    let mut ours = fetched.to_vec();
    if fetched.len() < cfg.referring_domain_limit {
        return ours;
    }

    let wanted = match usize::try_from(known) {
        Ok(0) | Err(_) => cfg.exclusion_domain_limit,
        Ok(n) => n.min(cfg.exclusion_domain_limit),
    };
    if wanted <= ours.len() {
        return ours;
    }

    let rest = or_default(
        gateway,
        "referring domains (exclusion set)",
        backlinks.referring_domains_from(domain, ours.len(), wanted - ours.len()),
    )
    .await;
    debug!(first_page = ours.len(), more = rest.len(), "Completed exclusion set");
    ours.extend(rest);
    ours
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "report generation panicked".to_string())
}

// ============================================================================
// Tests
// ============================================================================
