//! Collaborators the processor reads child products through.
//!
//! [`Catalog`] is the in-memory implementation: it backs the JSON catalog
//! files the CLI accepts and the snapshots `bundlegql-db` loads from Postgres.

use std::collections::BTreeMap;
use std::convert::Infallible;

use bundlegql_core::{CatalogProduct, ChildProduct};
use serde::{Deserialize, Serialize};

use crate::filter::ChildFilter;

/// Batched child product lookup.
pub trait ChildProductSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every product matching `filter`. Products that are disabled,
    /// deleted or otherwise filtered out are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the backing store cannot be read.
    fn fetch(&self, filter: &ChildFilter) -> Result<Vec<CatalogProduct>, Self::Error>;
}

/// Category associations of a child product.
pub trait CategoryResolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Category ids of `product`, in association order.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the backing store cannot be read.
    fn category_ids(&self, product: &CatalogProduct) -> Result<Vec<i64>, Self::Error>;
}

/// Turns a fetched catalog product into its API shape.
pub trait ChildFormatter {
    fn format(&self, product: &CatalogProduct) -> ChildProduct;
}

/// Copies every catalog field into the child product; category links are
/// attached later by the processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFormatter;

impl ChildFormatter for CatalogFormatter {
    fn format(&self, product: &CatalogProduct) -> ChildProduct {
        ChildProduct {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            type_id: product.type_id.clone(),
            price: product.price,
            attributes: product.attributes.clone(),
            category_links: Vec::new(),
        }
    }
}

/// A snapshot of child products and their category ids, keyed by SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<CatalogProduct>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<i64>>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<CatalogProduct>, categories: BTreeMap<String, Vec<i64>>) -> Self {
        Self {
            products,
            categories,
        }
    }

    #[must_use]
    pub fn with_product(mut self, product: CatalogProduct, category_ids: Vec<i64>) -> Self {
        if !category_ids.is_empty() {
            self.categories.insert(product.sku.clone(), category_ids);
        }
        self.products.push(product);
        self
    }

    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Category ids stored for `sku`, empty when none are known.
    #[must_use]
    pub fn categories_of(&self, sku: &str) -> &[i64] {
        self.categories.get(sku).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ChildProductSource for Catalog {
    type Error = Infallible;

    fn fetch(&self, filter: &ChildFilter) -> Result<Vec<CatalogProduct>, Self::Error> {
        Ok(self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }
}

impl CategoryResolver for Catalog {
    type Error = Infallible;

    fn category_ids(&self, product: &CatalogProduct) -> Result<Vec<i64>, Self::Error> {
        Ok(self.categories_of(&product.sku).to_vec())
    }
}
