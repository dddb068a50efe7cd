use crate::app_config::{AppConfig, Environment};
use crate::units::{DEFAULT_DIM_INFER_THRESHOLD_CM, DEFAULT_WEIGHT_INFER_THRESHOLD_KG};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so the parsing rules can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_threshold = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive number, got {value}"),
            });
        }
        Ok(value)
    };

    let database_url = optional("DATABASE_URL");
    let env = parse_environment(&or_default("RRP_ENV", "development"))?;
    let log_level = or_default("RRP_LOG_LEVEL", "info");
    let pricing_path = PathBuf::from(or_default("RRP_PRICING_PATH", "./config/pricing.yaml"));

    let db_max_connections = parse_u32("RRP_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("RRP_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("RRP_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let classifier_api_key = optional("OPENAI_API_KEY");
    let classifier_base_url = or_default("RRP_CLASSIFIER_BASE_URL", "https://api.openai.com/v1");
    let classifier_model = or_default("RRP_CLASSIFIER_MODEL", "gpt-4o-mini");
    let classifier_timeout_secs = parse_u64("RRP_CLASSIFIER_TIMEOUT_SECS", "30")?;
    let classifier_max_retries = parse_u32("RRP_CLASSIFIER_MAX_RETRIES", "2")?;
    let classifier_retry_backoff_base_ms = parse_u64("RRP_CLASSIFIER_RETRY_BACKOFF_BASE_MS", "1000")?;
    let classifier_max_concurrent = parse_usize("RRP_CLASSIFIER_MAX_CONCURRENT", "1")?;

    let dim_infer_threshold_cm =
        parse_threshold("RRP_DIM_INFER_THRESHOLD_CM", DEFAULT_DIM_INFER_THRESHOLD_CM)?;
    let weight_infer_threshold_kg =
        parse_threshold("RRP_WEIGHT_INFER_THRESHOLD_KG", DEFAULT_WEIGHT_INFER_THRESHOLD_KG)?;

    let mvideo_commissions_url = optional("RRP_MVIDEO_COMMISSIONS_URL");

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        pricing_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        classifier_api_key,
        classifier_base_url,
        classifier_model,
        classifier_timeout_secs,
        classifier_max_retries,
        classifier_retry_backoff_base_ms,
        classifier_max_concurrent,
        dim_infer_threshold_cm,
        weight_infer_threshold_kg,
        mvideo_commissions_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RRP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
