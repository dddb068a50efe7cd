use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Optional: database-free pricing runs (`price --catalog`) never need it.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub pricing_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Category classification is disabled when no key is configured.
    pub classifier_api_key: Option<String>,
    pub classifier_base_url: String,
    pub classifier_model: String,
    pub classifier_timeout_secs: u64,
    pub classifier_max_retries: u32,
    pub classifier_retry_backoff_base_ms: u64,
    pub classifier_max_concurrent: usize,
    pub dim_infer_threshold_cm: f64,
    pub weight_infer_threshold_kg: f64,
    /// Text-table commission document; unset means `commissions sync` needs `--url`.
    pub mvideo_commissions_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("pricing_path", &self.pricing_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "classifier_api_key",
                &self.classifier_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("classifier_base_url", &self.classifier_base_url)
            .field("classifier_model", &self.classifier_model)
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("classifier_max_retries", &self.classifier_max_retries)
            .field(
                "classifier_retry_backoff_base_ms",
                &self.classifier_retry_backoff_base_ms,
            )
            .field("classifier_max_concurrent", &self.classifier_max_concurrent)
            .field("dim_infer_threshold_cm", &self.dim_infer_threshold_cm)
            .field("weight_infer_threshold_kg", &self.weight_infer_threshold_kg)
            .field("mvideo_commissions_url", &self.mvideo_commissions_url)
            .finish()
    }
}

impl AppConfig {
    /// Returns `true` when an API key for the category classifier is present.
    #[must_use]
    pub fn classifier_enabled(&self) -> bool {
        self.classifier_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Database URL for commands that need Postgres.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}
