//! Credits command - credit prices and the remaining balance.

use anyhow::Result;
use clap::Args;
use rankscope_fetch::Gateway;
use rankscope_metrics::{AccountBalance, AccountFetcher};
use rankscope_store::Settings;
use tracing::warn;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the credits command.
#[derive(Args, Default)]
pub struct CreditsArgs {
    /// Only print prices, skip the balance lookup.
    #[arg(long)]
    pub offline: bool,

    /// API key for the balance lookup.
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Runs the credits command.
pub async fn run(args: &CreditsArgs, cli: &Cli) -> Result<()> {
    let settings = cli.settings_store().await.get().await;
    let table = settings.credit_table();

    let balance = if args.offline {
        Err("skipped (--offline)".to_string())
    } else {
        let balance = fetch_balance(&settings, args.api_key.clone()).await;
        if let Err(reason) = &balance {
            warn!(reason = %reason, "Balance unavailable");
        }
        balance
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_credits(table.entries(), balance.as_ref().ok()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let balance = balance.as_ref().map_err(String::as_str);
            println!("{}", formatter.format_credits(table.entries(), balance)?);
        }
    }

    Ok(())
}

/// Looks up the balance through a one-off gateway.
async fn fetch_balance(settings: &Settings, api_key: Option<String>) -> Result<AccountBalance, String> {
    let credential = settings
        .credential_source(api_key)
        .resolve()
        .map_err(|e| e.to_string())?;
    let gateway = Gateway::builder()
        .config(settings.gateway_config())
        .api_key(credential.key())
        .build()
        .map_err(|e| e.to_string())?;
    AccountFetcher::new(&gateway)
        .balance()
        .await
        .map_err(|e| e.to_string())
}
