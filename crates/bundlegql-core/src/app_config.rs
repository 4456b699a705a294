use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Only needed by commands that load children from Postgres.
    pub database_url: Option<String>,
    pub log_level: String,
    /// Optional YAML overlay for the built-in enum tables.
    pub enums_path: Option<PathBuf>,
    /// `type_id` value that marks a result record as a bundle.
    pub bundle_type_id: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("enums_path", &self.enums_path)
            .field("bundle_type_id", &self.bundle_type_id)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
