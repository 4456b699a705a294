use crate::app_config::AppConfig;
use crate::products::BUNDLE_TYPE_ID;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a
/// `HashMap` without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|s| !s.is_empty());
    let log_level = or_default("BUNDLEGQL_LOG_LEVEL", "info");
    let enums_path = lookup("BUNDLEGQL_ENUMS_PATH")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    let bundle_type_id = or_default("BUNDLEGQL_BUNDLE_TYPE_ID", BUNDLE_TYPE_ID);
    if bundle_type_id.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "BUNDLEGQL_BUNDLE_TYPE_ID".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let db_max_connections = parse_u32("BUNDLEGQL_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BUNDLEGQL_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BUNDLEGQL_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "BUNDLEGQL_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    Ok(AppConfig {
        database_url,
        log_level,
        enums_path,
        bundle_type_id,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
