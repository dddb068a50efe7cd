use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("unknown retailer '{0}'")]
    UnknownRetailer(String),

    #[error("unknown delivery zone '{zone}' for retailer {retailer}")]
    UnknownZone { zone: String, retailer: String },
}
