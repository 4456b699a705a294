//! Translation of stored attribute codes to public API enum labels.
//!
//! Each enum table maps an output label to the raw value the catalog stores
//! for it. Lookups compare the canonical form of the incoming value
//! ([`AttributeValue::canonical`]) against the canonical form of each table
//! entry.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attribute::AttributeValue;
use crate::ConfigError;

pub const PRICE_VIEW_ENUM: &str = "PriceViewEnum";
pub const SHIP_BUNDLE_ITEMS_ENUM: &str = "ShipBundleItemsEnum";
pub const PRICE_TYPE_ENUM: &str = "PriceTypeEnum";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnumLookupError {
    #[error("enum type \"{0}\" is not defined")]
    UndefinedEnum(String),
}

/// Resolves a raw attribute value to an enum label.
pub trait EnumLookup {
    /// Returns the label whose mapped value matches `raw`, `Ok(None)` when
    /// nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`EnumLookupError::UndefinedEnum`] if `enum_name` is unknown.
    fn resolve(
        &self,
        enum_name: &str,
        raw: &AttributeValue,
    ) -> Result<Option<String>, EnumLookupError>;
}

/// One enum: label → stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumTable(BTreeMap<String, AttributeValue>);

impl EnumTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, label: &str, value: impl Into<AttributeValue>) -> Self {
        self.0.insert(label.to_string(), value.into());
        self
    }

    fn label_for(&self, raw: &AttributeValue) -> Option<&str> {
        let wanted = raw.canonical();
        self.0
            .iter()
            .find(|(_, value)| value.canonical() == wanted)
            .map(|(label, _)| label.as_str())
    }
}

/// All enum tables known to the processor, keyed by enum name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumTables(BTreeMap<String, EnumTable>);

impl EnumTables {
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with_table(mut self, enum_name: &str, table: EnumTable) -> Self {
        self.0.insert(enum_name.to_string(), table);
        self
    }

    /// Overlays `other` on top of `self`; tables present in both are replaced.
    #[must_use]
    pub fn merged_with(mut self, other: EnumTables) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for EnumTables {
    fn default() -> Self {
        Self::empty()
            .with_table(
                PRICE_VIEW_ENUM,
                EnumTable::new().with("PRICE_RANGE", "0").with("AS_LOW_AS", "1"),
            )
            .with_table(
                SHIP_BUNDLE_ITEMS_ENUM,
                EnumTable::new().with("TOGETHER", "0").with("SEPARATELY", "1"),
            )
            .with_table(
                PRICE_TYPE_ENUM,
                EnumTable::new()
                    .with("FIXED", "fixed")
                    .with("PERCENT", "percent")
                    .with("DYNAMIC", "dynamic"),
            )
    }
}

impl EnumLookup for EnumTables {
    fn resolve(
        &self,
        enum_name: &str,
        raw: &AttributeValue,
    ) -> Result<Option<String>, EnumLookupError> {
        let table = self
            .0
            .get(enum_name)
            .ok_or_else(|| EnumLookupError::UndefinedEnum(enum_name.to_string()))?;
        Ok(table.label_for(raw).map(str::to_string))
    }
}

/// Load enum tables from a YAML file and overlay them on the built-in
/// defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_enum_tables(path: &Path) -> Result<EnumTables, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::EnumsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let tables: EnumTables =
        serde_yaml::from_str(&content).map_err(ConfigError::EnumsFileParse)?;

    Ok(EnumTables::default().merged_with(tables))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_price_view_labels() {
        let tables = EnumTables::default();
        assert_eq!(
            tables.resolve(PRICE_VIEW_ENUM, &AttributeValue::Int(0)),
            Ok(Some("PRICE_RANGE".to_string()))
        );
        assert_eq!(
            tables.resolve(PRICE_VIEW_ENUM, &AttributeValue::from("1")),
            Ok(Some("AS_LOW_AS".to_string()))
        );
    }

    #[test]
    fn resolves_ship_bundle_items_from_boolean() {
        let tables = EnumTables::default();
        assert_eq!(
            tables.resolve(SHIP_BUNDLE_ITEMS_ENUM, &AttributeValue::Bool(true)),
            Ok(Some("SEPARATELY".to_string()))
        );
    }

    #[test]
    fn unmatched_value_is_none() {
        let tables = EnumTables::default();
        assert_eq!(
            tables.resolve(PRICE_TYPE_ENUM, &AttributeValue::Int(0)),
            Ok(None)
        );
        assert_eq!(
            tables.resolve(PRICE_VIEW_ENUM, &AttributeValue::from("7")),
            Ok(None)
        );
    }

    #[test]
    fn undefined_enum_is_an_error() {
        let tables = EnumTables::default();
        assert_eq!(
            tables.resolve("NoSuchEnum", &AttributeValue::Int(0)),
            Err(EnumLookupError::UndefinedEnum("NoSuchEnum".to_string()))
        );
    }

    #[test]
    fn yaml_tables_overlay_defaults() {
        let yaml = "PriceTypeEnum:\n  FIXED: 0\n  PERCENT: 1\n";
        let overlay: EnumTables = serde_yaml::from_str(yaml).expect("valid yaml");
        let tables = EnumTables::default().merged_with(overlay);

        assert_eq!(
            tables.resolve(PRICE_TYPE_ENUM, &AttributeValue::from("1")),
            Ok(Some("PERCENT".to_string()))
        );
        // Untouched tables survive the overlay.
        assert_eq!(
            tables.resolve(PRICE_VIEW_ENUM, &AttributeValue::Int(1)),
            Ok(Some("AS_LOW_AS".to_string()))
        );
    }

    #[test]
    fn load_enum_tables_reports_missing_file() {
        let err = load_enum_tables(Path::new("/definitely/not/here/enums.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::EnumsFileIo { .. }));
    }

    #[test]
    fn shipped_enums_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/enums.yaml");
        let tables = load_enum_tables(&path).expect("shipped enums file loads");
        assert_eq!(tables, EnumTables::default());
    }
}
