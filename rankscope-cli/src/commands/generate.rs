//! Generate command - run the report pipeline for one domain.

use anyhow::Result;
use clap::Args;
use rankscope_report::{Progress, ReportGenerator, ReportRequest};
use rankscope_store::FileReportStore;
use tracing::{debug, info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the generate command.
#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Domain or URL to analyse.
    pub domain: String,

    /// Brand name used for AI search (derived from the domain if omitted).
    #[arg(long, short)]
    pub brand: Option<String>,

    /// Two-letter market code (defaults to the domain's top market).
    #[arg(long, short)]
    pub market: Option<String>,

    /// Competitor domains, repeatable or comma-separated.
    /// Replaces competitor discovery.
    #[arg(long = "competitor", short = 'c', value_delimiter = ',')]
    pub competitors: Vec<String>,

    /// API key for this run.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Do not keep the report in the local report store.
    #[arg(long)]
    pub no_store: bool,
}

impl GenerateArgs {
    fn request(&self) -> ReportRequest {
        let mut request =
            ReportRequest::new(self.domain.as_str()).competitors(self.competitors.iter().map(String::as_str));
        if let Some(brand) = &self.brand {
            request = request.brand(brand.as_str());
        }
        if let Some(market) = &self.market {
            request = request.market(market.as_str());
        }
        if let Some(key) = &self.api_key {
            request = request.api_key(key.as_str());
        }
        request
    }
}

/// Runs the generate command.
pub async fn run(args: &GenerateArgs, cli: &Cli) -> Result<()> {
    let settings = cli.settings_store().await.get().await;
    let generator = ReportGenerator::new(settings.gateway_config(), settings.report_config());
    let credentials = settings.credential_source(None);
    let request = args.request();

    info!(report = %request.id, domain = %request.domain, "Generating report");

    // Progress lines go to stderr so stdout stays clean for the report.
    let (progress, mut events) = Progress::with_events();
    let progress_formatter = TextFormatter::new(!cli.no_color);
    let show_progress = !cli.quiet;
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if show_progress {
                eprintln!("{}", progress_formatter.format_progress(&event));
            }
        }
    });

    let result = if args.no_store {
        generator.generate(&request, &credentials, &progress).await
    } else {
        let store = FileReportStore::default_location();
        match store.purge_expired().await {
            Ok(purged) => debug!(purged, "Report store swept"),
            Err(e) => warn!(error = %e, "Could not sweep expired reports"),
        }
        generator
            .generate_and_store(&request, &credentials, &progress, &store)
            .await
    };

    // Closing the sender ends the printer once it has drained.
    drop(progress);
    if let Err(e) = printer.await {
        debug!(error = %e, "Progress printer stopped");
    }

    let report = result?;
    if !args.no_store {
        info!(report = %report.id, "Report stored");
    }

    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                println!("{}", report.id);
            } else {
                println!();
                println!("{}", TextFormatter::new(!cli.no_color).format_report(&report));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&report)?);
        }
    }

    Ok(())
}
