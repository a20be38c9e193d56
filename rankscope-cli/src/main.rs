// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! RankScope CLI - consolidated SEO reports from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Generate a report (key from RANKSCOPE_API_KEY or settings)
//! rankscope generate example.com
//!
//! # Pin the market and competitors
//! rankscope generate example.com --market de --competitor rival.com,other.com
//!
//! # Full JSON report
//! rankscope generate example.com --format json --pretty
//!
//! # Show a stored report
//! rankscope show 3f2a9c1e-...
//!
//! # Credit prices and remaining balance
//! rankscope credits
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rankscope_report::ReportError;
use rankscope_store::{SettingsStore, StoreError, default_settings_path};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, credits, generate, show};

// ============================================================================
// CLI Definition
// ============================================================================

/// RankScope CLI - consolidated SEO reports.
#[derive(Parser)]
#[command(name = "rankscope")]
#[command(about = "Consolidated SEO reports from a rate-limited analytics provider")]
#[command(long_about = r"
RankScope builds one report for a domain out of many provider calls:
overview, keywords, backlinks, competitor gaps, AI search visibility and
paid ads.

The API key is taken from --api-key, then RANKSCOPE_API_KEY, then the
shared_api_key in the settings file.

Examples:
  rankscope generate example.com               # Report for the top market
  rankscope generate example.com --market de   # Pin the market
  rankscope show <id>                          # Show a stored report
  rankscope credits                            # Prices and balance
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report for a domain.
    #[command(visible_alias = "g")]
    Generate(generate::GenerateArgs),

    /// Show a stored report.
    #[command(visible_alias = "s")]
    Show(show::ShowArgs),

    /// Show credit prices and the remaining balance.
    #[command(visible_alias = "c")]
    Credits(credits::CreditsArgs),

    /// Manage settings.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Loads the settings file named on the command line, or the default.
    pub async fn settings_store(&self) -> SettingsStore {
        let path = self.settings.clone().unwrap_or_else(default_settings_path);
        SettingsStore::load(path).await
    }
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No usable API key or invalid target.
    FatalConfiguration = 2,
    /// Report not found or expired.
    NotFound = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        if error
            .downcast_ref::<ReportError>()
            .is_some_and(ReportError::is_fatal_configuration)
        {
            Self::FatalConfiguration
        } else if error
            .downcast_ref::<StoreError>()
            .is_some_and(StoreError::is_missing)
        {
            Self::NotFound
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("rankscope=debug,info")
    } else {
        EnvFilter::new("rankscope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<()> = match &cli.command {
        Commands::Generate(args) => generate::run(args, &cli).await,
        Commands::Show(args) => show::run(args, &cli).await,
        Commands::Credits(args) => credits::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };
    std::process::exit(code as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        let fatal = anyhow::Error::new(ReportError::FatalConfiguration("no key".into()));
        assert_eq!(ExitCode::for_error(&fatal), ExitCode::FatalConfiguration);

        let expired = anyhow::Error::new(StoreError::Expired("r1".into()));
        assert_eq!(ExitCode::for_error(&expired), ExitCode::NotFound);

        let wrapped = anyhow::Error::new(StoreError::NotFound("r1".into())).context("show");
        assert_eq!(ExitCode::for_error(&wrapped), ExitCode::NotFound);

        assert_eq!(ExitCode::for_error(&anyhow::anyhow!("boom")), ExitCode::Error);
        assert_eq!(ExitCode::Success as i32, 0);
    }
}
