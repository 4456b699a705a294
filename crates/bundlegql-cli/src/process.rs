//! The `process` command: read a result set, resolve bundle children from a
//! catalog file or from Postgres, and write the processed result set.

use std::path::PathBuf;

use anyhow::Context;
use bundlegql_core::AppConfig;
use bundlegql_processor::{BundleProcessor, Catalog};
use serde_json::{Map, Value};

use crate::enums::load_enums;
use crate::io::{read_json, write_json};

#[derive(Debug)]
pub(crate) struct ProcessArgs {
    pub input: PathBuf,
    pub catalog: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

pub(crate) async fn run_process(config: &AppConfig, args: &ProcessArgs) -> anyhow::Result<()> {
    let processor =
        BundleProcessor::new(load_enums(config)?).with_bundle_type_id(&config.bundle_type_id);

    let results: Map<String, Value> = read_json(&args.input)?;
    let refs = processor.collect(results)?;

    let catalog: Catalog = match &args.catalog {
        Some(path) => read_json(path)?,
        None => {
            let pool = bundlegql_db::connect_pool_from_config(config)
                .await
                .context("a catalog file or DATABASE_URL is required to resolve children")?;
            bundlegql_db::load_catalog(&pool, &refs.filter()).await?
        }
    };

    let processed = processor.resolve(refs, &catalog, &catalog)?;
    write_json(&processed, args.output.as_deref(), args.pretty)?;

    if let Some(path) = &args.output {
        tracing::info!(
            records = processed.len(),
            path = %path.display(),
            "wrote processed results"
        );
    }
    Ok(())
}
