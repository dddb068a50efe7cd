//! Live integration tests for rrp-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database. The
//! `migrations` path is relative to `crates/rrp-db/`.

use rrp_core::{CacheKey, CategoryCache, Dimensions, Product};
use rrp_db::{
    count_products, get_cached_category, list_products, load_commission_schedule,
    put_cached_category, replace_commission_schedule, upsert_product, PgCategoryCache,
};
use rrp_pricing::CommissionSchedule;

fn product(sku: &str, name: &str, cost: f64) -> Product {
    Product {
        sku: sku.to_string(),
        name: name.to_string(),
        dimensions: Dimensions::new(30.0, 20.0, 10.0, 1.25),
        cost,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_updates_in_place(pool: sqlx::PgPool) {
    let first = upsert_product(&pool, &product("A-1", "Самокат", 1000.0))
        .await
        .expect("first upsert");
    let second = upsert_product(&pool, &product("A-1", "Самокат 2025", 1100.456))
        .await
        .expect("second upsert");
    upsert_product(&pool, &product("B-2", "Шлем", 0.0))
        .await
        .expect("third upsert");

    assert_eq!(first, second);
    assert_eq!(count_products(&pool).await.unwrap(), 2);

    let rows = list_products(&pool).await.unwrap();
    assert_eq!(rows[0].sku, "A-1");
    assert_eq!(rows[0].name, "Самокат 2025");
    assert_eq!(rows[0].cost.to_string(), "1100.46");
    assert_eq!(rows[1].sku, "B-2");
}

#[sqlx::test(migrations = "../../migrations")]
async fn category_cache_round_trip(pool: sqlx::PgPool) {
    assert!(get_cached_category(&pool, "Шлем", "citilink")
        .await
        .unwrap()
        .is_none());

    put_cached_category(&pool, "Шлем", "citilink", "Спорт").await.unwrap();
    put_cached_category(&pool, "Шлем", "citilink", "Прочее").await.unwrap();

    let cached = get_cached_category(&pool, "Шлем", "citilink").await.unwrap();
    assert_eq!(cached.as_deref(), Some("Прочее"));
    assert!(get_cached_category(&pool, "Шлем", "mvideo")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn pg_category_cache_implements_trait(pool: sqlx::PgPool) {
    let cache = PgCategoryCache::new(pool);
    let key = CacheKey::new("Велосипед", "sportmaster");

    cache.put(&key, "Велосипеды").await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("Велосипеды"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn commission_schedule_replace_keeps_order(pool: sqlx::PgPool) {
    let first: CommissionSchedule = [("Телевизоры", 7.5), ("Смартфоны", 5.0)]
        .into_iter()
        .collect();
    replace_commission_schedule(&pool, "mvideo", &first).await.unwrap();

    let second: CommissionSchedule = [("Ноутбуки", 6.0), ("Аудио", 12.25), ("Смартфоны", 4.0)]
        .into_iter()
        .collect();
    let written = replace_commission_schedule(&pool, "mvideo", &second)
        .await
        .unwrap();
    assert_eq!(written, 3);

    let loaded = load_commission_schedule(&pool, "mvideo").await.unwrap();
    assert_eq!(loaded.categories(), vec!["Ноутбуки", "Аудио", "Смартфоны"]);
    assert_eq!(loaded.get("Аудио"), Some(12.25));
    assert_eq!(loaded.get("Телевизоры"), None);

    let other = load_commission_schedule(&pool, "citilink").await.unwrap();
    assert!(other.is_empty());
}
