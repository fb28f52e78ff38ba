mod cli;
mod commands;
mod mcp;
mod page_range;
mod pdf;
mod scratch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Merge {
            inputs,
            pages,
            output,
        } => {
            commands::merge::run(&inputs, &pages, &output)?;
        }
        Commands::Split {
            path,
            pages,
            output,
        } => {
            commands::split::run(&path, &pages, &output)?;
        }
        Commands::Compress { path, output } => {
            commands::compress::run(&path, &output)?;
        }
        Commands::Images { inputs, output } => {
            commands::images::run(&inputs, &output)?;
        }
    }

    Ok(())
}
