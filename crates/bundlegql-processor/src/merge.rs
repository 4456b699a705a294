//! Second pass: one batched child fetch, then splice children into the
//! link slots of the bundles that reference them.

use std::collections::{BTreeMap, HashMap};

use bundlegql_core::{ChildProduct, LinkedProduct};

use crate::collect::ChildReferences;
use crate::error::ProcessError;
use crate::filter::ChildFilter;
use crate::result::{ProcessedRecord, ProcessedResults};
use crate::source::{CategoryResolver, ChildFormatter, ChildProductSource};

/// Fetches every child matching `filter` in one call, formats each and
/// attaches its category links.
///
/// An empty filter returns no children without calling `source`.
///
/// # Errors
///
/// Returns [`ProcessError::Fetch`] if the batch fetch fails or
/// [`ProcessError::Categories`] if a category lookup fails.
pub fn fetch_children<S, C, F>(
    filter: &ChildFilter,
    source: &S,
    categories: &C,
    formatter: &F,
) -> Result<Vec<ChildProduct>, ProcessError>
where
    S: ChildProductSource,
    C: CategoryResolver,
    F: ChildFormatter,
{
    if filter.is_empty() {
        tracing::debug!("no bundle links to resolve; skipping child fetch");
        return Ok(Vec::new());
    }

    let products = source
        .fetch(filter)
        .map_err(|e| ProcessError::Fetch(Box::new(e)))?;
    tracing::debug!(
        %filter,
        fetched = products.len(),
        "fetched bundle children"
    );

    products
        .iter()
        .map(|product| {
            let category_ids =
                categories
                    .category_ids(product)
                    .map_err(|e| ProcessError::Categories {
                        sku: product.sku.clone(),
                        source: Box::new(e),
                    })?;
            let mut child = formatter.format(product);
            child.remove_shadowed_attributes();
            child.attach_categories(&category_ids);
            Ok(child)
        })
        .collect()
}

/// Writes each child into every link slot keyed by its SKU, for every
/// bundle whose membership set contains that SKU. Slots with no matching
/// child keep [`LinkedProduct::NotFound`].
#[must_use]
pub fn merge_children(refs: ChildReferences, children: &[ChildProduct]) -> ProcessedResults {
    let ChildReferences {
        mut records,
        membership,
        ..
    } = refs;

    let arena: HashMap<&str, &ChildProduct> = children
        .iter()
        .map(|child| (child.sku.as_str(), child))
        .collect();
    let mut unresolved: BTreeMap<String, usize> = BTreeMap::new();

    for (_, record) in &mut records {
        let ProcessedRecord::Bundle(bundle) = record else {
            continue;
        };
        let members = membership.get(&bundle.sku);

        for item in bundle.items.iter_mut().flatten() {
            for (sku, slot) in item.options.iter_mut() {
                let child = members
                    .filter(|members| members.contains(sku))
                    .and_then(|_| arena.get(sku));
                match child {
                    Some(child) => slot.resolve(child),
                    None => *unresolved.entry(sku.to_string()).or_default() += 1,
                }
            }
        }
    }

    for (sku, slots) in &unresolved {
        tracing::warn!(
            sku = %sku,
            slots,
            "{}",
            LinkedProduct::NOT_FOUND_MESSAGE
        );
    }

    ProcessedResults::from_entries(records)
}
