//! Read queries for `catalog_products` and `catalog_category_products`.

use std::collections::{BTreeMap, HashMap};

use bundlegql_core::CatalogProduct;
use bundlegql_processor::{Catalog, ChildFilter, FilterField};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `catalog_products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogProductRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub type_id: Option<String>,
    /// `"enabled"` or `"disabled"`.
    pub status: String,
    pub price: Option<Decimal>,
    /// Free-form product attributes; always a JSON object.
    pub attributes: Value,
    pub updated_at: DateTime<Utc>,
}

impl CatalogProductRow {
    #[must_use]
    pub fn into_catalog_product(self) -> CatalogProduct {
        let attributes = match self.attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        CatalogProduct {
            id: self.id,
            sku: self.sku,
            name: self.name,
            type_id: self.type_id,
            price: self.price,
            attributes,
        }
    }
}

/// A row from the `catalog_category_products` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryAssignmentRow {
    pub product_id: i64,
    pub category_id: i64,
    pub position: i32,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the enabled products matching `filter`, in one query.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn fetch_children(
    pool: &PgPool,
    filter: &ChildFilter,
) -> Result<Vec<CatalogProductRow>, DbError> {
    let skus: Vec<String> = filter.values().iter().cloned().collect();

    let sql = match filter.field() {
        FilterField::Sku => {
            "SELECT id, sku, name, type_id, status, price, attributes, updated_at \
             FROM catalog_products \
             WHERE sku = ANY($1) AND status = 'enabled' \
             ORDER BY sku"
        }
    };

    let rows = sqlx::query_as::<_, CatalogProductRow>(sql)
        .bind(skus)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns the category assignments of every product in `product_ids`,
/// ordered by product, then `position`, then `category_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn fetch_category_assignments(
    pool: &PgPool,
    product_ids: &[i64],
) -> Result<Vec<CategoryAssignmentRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryAssignmentRow>(
        "SELECT product_id, category_id, position \
         FROM catalog_category_products \
         WHERE product_id = ANY($1) \
         ORDER BY product_id, position, category_id",
    )
    .bind(product_ids.to_vec())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Loads the children matching `filter` and their category ids into an
/// in-memory [`Catalog`] the processor can resolve against synchronously.
///
/// Runs two queries regardless of how many SKUs are requested, and none
/// when the filter is empty.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn load_catalog(pool: &PgPool, filter: &ChildFilter) -> Result<Catalog, DbError> {
    if filter.is_empty() {
        return Ok(Catalog::default());
    }

    let rows = fetch_children(pool, filter).await?;
    let product_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let assignments = fetch_category_assignments(pool, &product_ids).await?;

    let sku_by_id: HashMap<i64, &str> = rows
        .iter()
        .map(|row| (row.id, row.sku.as_str()))
        .collect();
    let mut categories: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for assignment in &assignments {
        if let Some(sku) = sku_by_id.get(&assignment.product_id) {
            categories
                .entry((*sku).to_string())
                .or_default()
                .push(assignment.category_id);
        }
    }

    tracing::debug!(
        requested = filter.len(),
        found = rows.len(),
        category_links = assignments.len(),
        "loaded bundle children from catalog"
    );

    let products = rows
        .into_iter()
        .map(CatalogProductRow::into_catalog_product)
        .collect();
    Ok(Catalog::new(products, categories))
}
