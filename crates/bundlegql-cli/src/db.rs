use std::path::PathBuf;

use bundlegql_core::AppConfig;
use bundlegql_processor::Catalog;
use clap::Subcommand;

use crate::io::read_json;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the catalog database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert products and category assignments from a catalog JSON file
    Seed {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,
    },
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = bundlegql_db::connect_pool_from_config(config).await?;

    match command {
        DbCommands::Ping => {
            bundlegql_db::ping(&pool).await?;
            println!("database connection ok");
        }
        DbCommands::Migrate => {
            let applied = bundlegql_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Seed { catalog } => {
            let catalog: Catalog = read_json(&catalog)?;
            let count = bundlegql_db::seed_catalog(&pool, &catalog).await?;
            println!("seeded {count} product(s)");
        }
    }

    pool.close().await;
    Ok(())
}
