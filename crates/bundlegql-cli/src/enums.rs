use clap::Subcommand;

use bundlegql_core::{AppConfig, EnumTables};

/// Sub-commands available under `enums`.
#[derive(Debug, Subcommand)]
pub enum EnumsCommands {
    /// Print the active enum tables as YAML
    Show,
}

/// Built-in enum tables, overlaid with `BUNDLEGQL_ENUMS_PATH` when set.
pub(crate) fn load_enums(config: &AppConfig) -> anyhow::Result<EnumTables> {
    match &config.enums_path {
        Some(path) => {
            let tables = bundlegql_core::load_enum_tables(path)?;
            tracing::debug!(path = %path.display(), "loaded enum tables");
            Ok(tables)
        }
        None => Ok(EnumTables::default()),
    }
}

pub(crate) fn run_enums(config: &AppConfig, command: &EnumsCommands) -> anyhow::Result<()> {
    match command {
        EnumsCommands::Show => {
            let tables = load_enums(config)?;
            print!("{}", serde_yaml::to_string(&tables)?);
        }
    }
    Ok(())
}
