//! Config command - manage settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use rankscope_store::{default_config_dir, default_reports_dir};
use tracing::info;

use crate::output::{JsonFormatter, PathsOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current settings.
    Show,

    /// Show configuration paths.
    Path,

    /// Set the market used when a domain has no traffic breakdown.
    Market {
        /// Two-letter market code, e.g. us, de.
        market: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli).await,
        ConfigAction::Market { market } => set_market(market, cli).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let store = cli.settings_store().await;
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("RankScope Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API base URL:     {}", settings.api_base_url);
            println!(
                "Rate limit:       {} burst, {}/s",
                settings.rate_limit.capacity, settings.rate_limit.refill_per_second
            );
            println!("Request timeout:  {}s", settings.request_timeout_secs);
            println!("Call logging:     {}", settings.call_logging);
            println!(
                "Shared API key:   {}",
                if settings.shared_api_key.is_some() { "set" } else { "not set" }
            );
            println!();
            println!("Default market:   {}", settings.default_market);
            println!("Max competitors:  {}", settings.max_competitors);
            println!("AI engines:       {}", settings.ai_engines.join(", "));
            println!("Report TTL:       {}h", settings.report_ttl_hours);
        }
        OutputFormat::Json => {
            // Never print the key itself.
            let mut settings = settings;
            if settings.shared_api_key.is_some() {
                settings.shared_api_key = Some("<redacted>".to_string());
            }
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let store = cli.settings_store().await;
    let paths = PathsOutput {
        config_dir: default_config_dir().display().to_string(),
        settings_file: store.path().display().to_string(),
        reports_dir: default_reports_dir().display().to_string(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", paths.config_dir);
            println!("Settings file: {}", paths.settings_file);
            println!("Reports dir:   {}", paths.reports_dir);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_market(market: &str, cli: &Cli) -> Result<()> {
    let market = market.trim().to_ascii_lowercase();
    if market.len() != 2 || !market.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("Invalid market: {market}. Use a two-letter code such as us or de");
    }

    let store = cli.settings_store().await;
    store.update(|s| s.default_market.clone_from(&market)).await;
    store.save().await?;

    info!(market = %market, "Default market updated");
    println!("Default market set to: {market}");

    Ok(())
}

async fn reset_config(cli: &Cli) -> Result<()> {
    let store = cli.settings_store().await;
    let path = store.path();

    if tokio::fs::try_exists(path).await? {
        tokio::fs::remove_file(path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
