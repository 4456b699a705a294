//! First pass: reshape bundle records and gather the child SKUs they link to.

use std::collections::{BTreeSet, HashMap, HashSet};

use bundlegql_core::{BundleItem, EnumLookup, LinkSlots, RawBundleProduct};
use serde_json::{Map, Value};

use crate::error::ProcessError;
use crate::filter::ChildFilter;
use crate::format::{format_bundle_attributes, format_link};
use crate::result::ProcessedRecord;

/// Output of the first pass.
///
/// Holds the partially formatted result set (every link slot still
/// `NotFound`), the SKUs to fetch and which parent references which child.
#[derive(Debug, Clone, Default)]
pub struct ChildReferences {
    pub(crate) records: Vec<(String, ProcessedRecord)>,
    pub(crate) membership: HashMap<String, HashSet<String>>,
    child_skus: BTreeSet<String>,
}

impl ChildReferences {
    /// The filter for the single batched child fetch.
    #[must_use]
    pub fn filter(&self) -> ChildFilter {
        ChildFilter::sku_in(self.child_skus.iter().cloned())
    }

    #[must_use]
    pub fn child_skus(&self) -> &BTreeSet<String> {
        &self.child_skus
    }

    /// Child SKUs referenced by the bundle with `parent_sku`.
    #[must_use]
    pub fn children_of(&self, parent_sku: &str) -> Option<&HashSet<String>> {
        self.membership.get(parent_sku)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn bundle_count(&self) -> usize {
        self.records
            .iter()
            .filter(|(_, record)| matches!(record, ProcessedRecord::Bundle(_)))
            .count()
    }
}

pub(crate) fn is_bundle(record: &Value, bundle_type_id: &str) -> bool {
    record.get("type_id").and_then(Value::as_str) == Some(bundle_type_id)
}

/// Scans `results`, formats every bundle record and records the child SKUs
/// of each bundle link. Non-bundle records are kept as they are.
///
/// # Errors
///
/// Returns [`ProcessError::MalformedBundle`] if a bundle record cannot be
/// read into the bundle shape, or [`ProcessError::EnumLookup`] if an enum
/// table is missing.
pub fn collect_child_references<L: EnumLookup>(
    results: Map<String, Value>,
    lookup: &L,
    bundle_type_id: &str,
) -> Result<ChildReferences, ProcessError> {
    let mut refs = ChildReferences::default();

    for (key, record) in results {
        if !is_bundle(&record, bundle_type_id) {
            refs.records.push((key, ProcessedRecord::Passthrough(record)));
            continue;
        }

        let mut raw: RawBundleProduct = match serde_json::from_value(record) {
            Ok(raw) => raw,
            Err(source) => return Err(ProcessError::MalformedBundle { key, source }),
        };
        let options = raw.bundle_product_options.take();
        let mut bundle = format_bundle_attributes(raw, lookup)?;

        if let Some(options) = options {
            let members = refs.membership.entry(bundle.sku.clone()).or_default();
            let mut items = Vec::with_capacity(options.len());

            for option in options {
                let mut slots = LinkSlots::new();
                for link in option.product_links {
                    let sku = link.sku.clone();
                    members.insert(sku.clone());
                    refs.child_skus.insert(sku.clone());
                    slots.insert(sku, format_link(link, lookup)?);
                }
                items.push(BundleItem::new(option.data, slots));
            }

            bundle.set_items(items);
        }

        tracing::debug!(
            key = %key,
            sku = %bundle.sku,
            items = bundle.items.as_ref().map_or(0, Vec::len),
            "collected bundle"
        );
        refs.records.push((key, ProcessedRecord::Bundle(Box::new(bundle))));
    }

    Ok(refs)
}
