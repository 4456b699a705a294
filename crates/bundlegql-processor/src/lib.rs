//! Post-fetch processing of bundle products.
//!
//! A result set produced by the product query is processed in two passes:
//! [`collect_child_references`] reshapes bundle records and gathers the SKUs
//! of their linked children, then [`fetch_children`] loads those children in
//! a single batch and [`merge_children`] writes them into the link slots.
//! [`BundleProcessor`] runs both passes.

pub mod collect;
pub mod error;
pub mod filter;
pub mod format;
pub mod merge;
pub mod processor;
pub mod result;
pub mod source;

pub use collect::{collect_child_references, ChildReferences};
pub use error::ProcessError;
pub use filter::{ChildFilter, Condition, FilterField};
pub use format::{format_bundle_attributes, format_link, DEFAULT_LINK_PRICE_TYPE};
pub use merge::{fetch_children, merge_children};
pub use processor::BundleProcessor;
pub use result::{ProcessedRecord, ProcessedResults};
pub use source::{Catalog, CatalogFormatter, CategoryResolver, ChildFormatter, ChildProductSource};
