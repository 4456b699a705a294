use bundlegql_core::{EnumLookup, EnumTables, BUNDLE_TYPE_ID};
use serde_json::{Map, Value};

use crate::collect::{collect_child_references, ChildReferences};
use crate::error::ProcessError;
use crate::merge::{fetch_children, merge_children};
use crate::result::ProcessedResults;
use crate::source::{CatalogFormatter, CategoryResolver, ChildFormatter, ChildProductSource};

/// Post-fetch processor for bundle products.
///
/// Holds no per-call state: every call to [`BundleProcessor::process`]
/// builds its own filter and membership map.
#[derive(Debug, Clone)]
pub struct BundleProcessor<L = EnumTables, F = CatalogFormatter> {
    enums: L,
    formatter: F,
    bundle_type_id: String,
}

impl BundleProcessor {
    #[must_use]
    pub fn new(enums: EnumTables) -> Self {
        Self {
            enums,
            formatter: CatalogFormatter,
            bundle_type_id: BUNDLE_TYPE_ID.to_string(),
        }
    }
}

impl Default for BundleProcessor {
    fn default() -> Self {
        Self::new(EnumTables::default())
    }
}

impl<L, F> BundleProcessor<L, F>
where
    L: EnumLookup,
    F: ChildFormatter,
{
    #[must_use]
    pub fn with_formatter<G: ChildFormatter>(self, formatter: G) -> BundleProcessor<L, G> {
        BundleProcessor {
            enums: self.enums,
            formatter,
            bundle_type_id: self.bundle_type_id,
        }
    }

    #[must_use]
    pub fn with_enum_lookup<M: EnumLookup>(self, enums: M) -> BundleProcessor<M, F> {
        BundleProcessor {
            enums,
            formatter: self.formatter,
            bundle_type_id: self.bundle_type_id,
        }
    }

    #[must_use]
    pub fn with_bundle_type_id(mut self, bundle_type_id: impl Into<String>) -> Self {
        self.bundle_type_id = bundle_type_id.into();
        self
    }

    #[must_use]
    pub fn bundle_type_id(&self) -> &str {
        &self.bundle_type_id
    }

    /// First pass only. Useful when the children have to be loaded
    /// asynchronously for [`ChildReferences::filter`] before calling
    /// [`BundleProcessor::resolve`].
    ///
    /// # Errors
    ///
    /// See [`collect_child_references`].
    pub fn collect(&self, results: Map<String, Value>) -> Result<ChildReferences, ProcessError> {
        collect_child_references(results, &self.enums, &self.bundle_type_id)
    }

    /// Second pass: fetch the referenced children and merge them in.
    ///
    /// # Errors
    ///
    /// See [`fetch_children`].
    pub fn resolve<S, C>(
        &self,
        refs: ChildReferences,
        source: &S,
        categories: &C,
    ) -> Result<ProcessedResults, ProcessError>
    where
        S: ChildProductSource,
        C: CategoryResolver,
    {
        let requested = refs.child_skus().len();
        let records = refs.record_count();
        let bundles = refs.bundle_count();

        let children = fetch_children(&refs.filter(), source, categories, &self.formatter)?;
        let found = children.len();
        let results = merge_children(refs, &children);

        tracing::info!(
            records,
            bundles,
            requested,
            found,
            "processed bundle products"
        );
        Ok(results)
    }

    /// Runs both passes over `results`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] for malformed bundle records, undefined enum
    /// tables and collaborator failures. Children that cannot be found are
    /// not errors; their slots stay `NotFound`.
    pub fn process<S, C>(
        &self,
        results: Map<String, Value>,
        source: &S,
        categories: &C,
    ) -> Result<ProcessedResults, ProcessError>
    where
        S: ChildProductSource,
        C: CategoryResolver,
    {
        let refs = self.collect(results)?;
        self.resolve(refs, source, categories)
    }
}
