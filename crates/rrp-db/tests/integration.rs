//! Offline tests for rrp-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use rrp_core::{AppConfig, Environment, Product};
use rrp_db::{connect_pool_from_config, DbError, PoolConfig, ProductRow};
use rust_decimal::Decimal;

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        log_level: "info".to_string(),
        pricing_path: PathBuf::from("./config/pricing.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        classifier_api_key: None,
        classifier_base_url: "https://api.openai.com/v1".to_string(),
        classifier_model: "gpt-4o-mini".to_string(),
        classifier_timeout_secs: 30,
        classifier_max_retries: 2,
        classifier_retry_backoff_base_ms: 1000,
        classifier_max_concurrent: 1,
        dim_infer_threshold_cm: 250.0,
        weight_infer_threshold_kg: 150.0,
        mvideo_commissions_url: Some("https://example.com/commissions".to_string()),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_without_database_url_fails_fast() {
    let err = connect_pool_from_config(&app_config(None)).await.unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}

#[test]
fn product_row_converts_to_product() {
    use chrono::Utc;

    let row = ProductRow {
        id: 1,
        sku: "A-1".to_string(),
        name: "Велосипед".to_string(),
        length_cm: 150.0,
        width_cm: 60.0,
        height_cm: 25.0,
        weight_kg: 14.5,
        cost: Decimal::new(1_200_050, 2),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let product = Product::from(row);
    assert_eq!(product.sku, "A-1");
    assert!((product.cost - 12_000.50).abs() < 1e-9);
    assert!((product.dimensions.weight_kg - 14.5).abs() < f64::EPSILON);
    assert!(product.dimensions.is_complete());
}
