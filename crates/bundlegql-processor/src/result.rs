use bundlegql_core::BundleProduct;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One record of the processed result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProcessedRecord {
    Bundle(Box<BundleProduct>),
    /// Any non-bundle record, exactly as it came in.
    Passthrough(Value),
}

impl ProcessedRecord {
    #[must_use]
    pub fn as_bundle(&self) -> Option<&BundleProduct> {
        match self {
            ProcessedRecord::Bundle(bundle) => Some(bundle),
            ProcessedRecord::Passthrough(_) => None,
        }
    }
}

/// The processed result set, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedResults(Vec<(String, ProcessedRecord)>);

impl ProcessedResults {
    pub(crate) fn from_entries(entries: Vec<(String, ProcessedRecord)>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ProcessedRecord> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, record)| record)
    }

    #[must_use]
    pub fn bundle(&self, key: &str) -> Option<&BundleProduct> {
        self.get(key).and_then(ProcessedRecord::as_bundle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProcessedRecord)> {
        self.0.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn bundles(&self) -> impl Iterator<Item = &BundleProduct> {
        self.0.iter().filter_map(|(_, record)| record.as_bundle())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ProcessedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, record) in &self.0 {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}
