mod db;
mod enums;
mod io;
mod process;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::enums::EnumsCommands;

#[derive(Debug, Parser)]
#[command(name = "bundlegql")]
#[command(about = "Bundle product post-fetch processor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Format bundle records and resolve their linked child products
    Process {
        /// Result set JSON file, or `-` for stdin
        #[arg(long, short)]
        input: PathBuf,
        /// Catalog JSON file to resolve children from instead of Postgres
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Write the processed result set here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Catalog database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect the enum tables used for attribute formatting
    Enums {
        #[command(subcommand)]
        command: EnumsCommands,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bundlegql_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Process {
            input,
            catalog,
            output,
            pretty,
        }) => {
            process::run_process(
                &config,
                &process::ProcessArgs {
                    input,
                    catalog,
                    output,
                    pretty,
                },
            )
            .await?;
        }
        Some(Commands::Db { command }) => db::run_db(&config, command).await?,
        Some(Commands::Enums { command }) => enums::run_enums(&config, &command)?,
        None => println!("bundlegql: no command given; see --help"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
