use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

mod commands;

/// Generate, list, download and delete Pokémon reports.
#[derive(Debug, Parser)]
#[command(name = "pokereports", version)]
pub struct Cli {
    /// Root URL of the report API.
    #[arg(long, global = true, env = "POKEREPORTS_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the selectable Pokémon types.
    Types,
    /// Show the report table.
    List {
        /// Oldest first instead of newest first.
        #[arg(long)]
        asc: bool,
    },
    /// Request a new report and show the refreshed table.
    Create {
        #[arg(long = "type")]
        pokemon_type: String,
        /// Number of records; digits only.
        #[arg(long)]
        count: String,
    },
    /// Check a completed report's link and save the file.
    Download {
        id: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// On an expired link, refresh the list right away.
        #[arg(long)]
        recover: bool,
    },
    /// Delete a completed report.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Inspect or change the saved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
    SetUrl { url: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli).await
}
