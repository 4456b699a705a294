use bundlegql_core::EnumLookupError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("bundle record {key} does not match the bundle shape: {source}")]
    MalformedBundle {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    EnumLookup(#[from] EnumLookupError),

    #[error("child product fetch failed: {0}")]
    Fetch(#[source] BoxError),

    #[error("category lookup failed for {sku}: {source}")]
    Categories {
        sku: String,
        #[source]
        source: BoxError,
    },
}
