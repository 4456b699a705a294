pub mod app_config;
pub mod attribute;
pub mod config;
pub mod enums;
pub mod products;

pub use app_config::AppConfig;
pub use attribute::{is_truthy, AttributeValue};
pub use config::{load_app_config, load_app_config_from_env};
pub use enums::{
    load_enum_tables, EnumLookup, EnumLookupError, EnumTable, EnumTables, PRICE_TYPE_ENUM,
    PRICE_VIEW_ENUM, SHIP_BUNDLE_ITEMS_ENUM,
};
pub use products::{
    BundleItem, BundleItemOption, BundleProduct, CatalogProduct, CategoryLink, ChildProduct,
    LinkSlots, LinkedProduct, RawBundleLink, RawBundleOption, RawBundleProduct, BUNDLE_TYPE_ID,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read enums file {path}: {source}")]
    EnumsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse enums file: {0}")]
    EnumsFileParse(#[from] serde_yaml::Error),
}
