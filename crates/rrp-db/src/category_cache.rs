//! Persistent `(product name, retailer) → category` cache.

use rrp_core::{CacheKey, CategoryCache, CategoryError};
use sqlx::PgPool;

use crate::DbError;

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_cached_category(
    pool: &PgPool,
    name: &str,
    retailer: &str,
) -> Result<Option<String>, DbError> {
    let category = sqlx::query_scalar::<_, String>(
        "SELECT category FROM category_cache WHERE name = $1 AND retailer = $2",
    )
    .bind(name)
    .bind(retailer)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Inserts or replaces the cached category for `(name, retailer)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn put_cached_category(
    pool: &PgPool,
    name: &str,
    retailer: &str,
    category: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO category_cache (name, retailer, category) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (name, retailer) DO UPDATE SET \
             category   = EXCLUDED.category, \
             updated_at = NOW()",
    )
    .bind(name)
    .bind(retailer)
    .bind(category)
    .execute(pool)
    .await?;

    Ok(())
}

/// [`CategoryCache`] backed by the `category_cache` table.
#[derive(Debug, Clone)]
pub struct PgCategoryCache {
    pool: PgPool,
}

impl PgCategoryCache {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CategoryCache for PgCategoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CategoryError> {
        get_cached_category(&self.pool, &key.name, &key.retailer)
            .await
            .map_err(|e| CategoryError::Cache(e.to_string()))
    }

    async fn put(&self, key: &CacheKey, category: &str) -> Result<(), CategoryError> {
        put_cached_category(&self.pool, &key.name, &key.retailer, category)
            .await
            .map_err(|e| CategoryError::Cache(e.to_string()))
    }
}
