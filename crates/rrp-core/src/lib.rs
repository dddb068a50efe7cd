pub mod app_config;
pub mod category;
pub mod config;
pub mod pricing;
pub mod products;
pub mod units;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{
    CacheKey, CategoryCache, CategoryClassifier, CategoryError, MemoryCategoryCache, NoClassifier,
    UNKNOWN_CATEGORY,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use pricing::{
    load_pricing_file, validate_parameters, LemanProOptions, PricingFile, PricingParameters,
    RetailerOptions, SportmasterOptions, TaxRegime,
};
pub use products::{Dimensions, Product};
pub use units::{
    normalize, normalize_checked, normalize_number, parse_number, Conversion, Unit,
    DEFAULT_DIM_INFER_THRESHOLD_CM, DEFAULT_WEIGHT_INFER_THRESHOLD_KG,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read pricing file {path}: {source}")]
    PricingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pricing file: {0}")]
    PricingFileParse(#[from] serde_yaml::Error),

    #[error("invalid pricing parameters: {0}")]
    Validation(String),
}
