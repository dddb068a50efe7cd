//! Database operations for the `products` catalog.

use chrono::{DateTime, Utc};
use rrp_core::{Dimensions, Product};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::numeric::{from_numeric, to_numeric};
use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            sku: row.sku,
            name: row.name,
            dimensions: Dimensions::new(row.length_cm, row.width_cm, row.height_cm, row.weight_kg),
            cost: from_numeric(row.cost),
        }
    }
}

/// Upserts a product by SKU.
///
/// Conflicts on `sku` update the name, dimensions, weight, cost and
/// `updated_at` in place. Returns the internal `id` of the row.
///
/// # Errors
///
/// Returns [`DbError::InvalidNumber`] for a non-finite cost, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product(pool: &PgPool, product: &Product) -> Result<i64, DbError> {
    let cost = to_numeric("cost", product.cost.max(0.0))?;
    let dims = &product.dimensions;

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (sku, name, length_cm, width_cm, height_cm, weight_kg, cost) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (sku) DO UPDATE SET \
             name       = EXCLUDED.name, \
             length_cm  = EXCLUDED.length_cm, \
             width_cm   = EXCLUDED.width_cm, \
             height_cm  = EXCLUDED.height_cm, \
             weight_kg  = EXCLUDED.weight_kg, \
             cost       = EXCLUDED.cost, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(&product.sku)
    .bind(&product.name)
    .bind(dims.length_cm)
    .bind(dims.width_cm)
    .bind(dims.height_cm)
    .bind(dims.weight_kg)
    .bind(cost)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Lists the catalog in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, sku, name, length_cm, width_cm, height_cm, weight_kg, cost, \
                created_at, updated_at \
         FROM products \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
