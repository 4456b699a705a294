use std::collections::HashSet;

use bundlegql_processor::Catalog;
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// Upsert every product of `catalog` by SKU and replace its category
/// assignments.
///
/// A category id listed more than once for a product is stored once, at its
/// first position, and logged.
///
/// Product ids in `catalog` are ignored; the database assigns its own.
/// Returns the number of products processed. All writes run inside a single
/// transaction; if any operation fails the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_catalog(pool: &PgPool, catalog: &Catalog) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for product in catalog.products() {
        let attributes = Value::Object(product.attributes.clone());

        let product_id: i64 = sqlx::query_scalar(
            "INSERT INTO catalog_products (sku, name, type_id, price, attributes) \
             VALUES ($1, $2, $3, $4, $5::jsonb) \
             ON CONFLICT (sku) DO UPDATE SET \
                 name       = EXCLUDED.name, \
                 type_id    = EXCLUDED.type_id, \
                 price      = EXCLUDED.price, \
                 attributes = EXCLUDED.attributes, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.type_id)
        .bind(product.price)
        .bind(attributes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM catalog_category_products WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let listed = catalog.categories_of(&product.sku);
        let category_ids = unique_category_ids(listed);
        if category_ids.len() < listed.len() {
            tracing::warn!(
                sku = %product.sku,
                listed = listed.len(),
                stored = category_ids.len(),
                "duplicate category ids in catalog; keeping first occurrence"
            );
        }

        for (position, category_id) in category_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO catalog_category_products (product_id, category_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(category_id)
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        count += 1;
    }

    tx.commit().await?;
    tracing::info!(products = count, "seeded catalog");
    Ok(count)
}

/// `category_ids` without repeats, in first-seen order.
fn unique_category_ids(category_ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(category_ids.len());
    category_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}
