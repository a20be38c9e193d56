//! Show command - print a stored report.

use anyhow::Result;
use clap::Args;
use rankscope_store::{FileReportStore, load_required};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Report id printed by `generate`.
    pub id: String,
}

/// Runs the show command.
pub async fn run(args: &ShowArgs, cli: &Cli) -> Result<()> {
    let store = FileReportStore::default_location();
    let record = load_required(&store, &args.id).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_stored(&record));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&record)?);
        }
    }

    Ok(())
}
