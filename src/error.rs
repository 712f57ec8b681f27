//! Error types for rate loading and table validation

use thiserror::Error;

/// Errors raised while loading or validating engine inputs.
///
/// Projection arithmetic itself never fails; these only come from building
/// rate tables and denomination tables out of external data.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Invalid exchange rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },

    #[error("Reference currency {code} must map to 1.0, got {rate}")]
    ReferenceRateMismatch { code: String, rate: f64 },

    #[error("Rate snapshot is based on {found}, expected {expected}")]
    BaseCurrencyMismatch { expected: String, found: String },

    #[error("Invalid maximum rate age: {0} hours")]
    InvalidMaxAge(i64),

    #[error("Invalid denomination table: {0}")]
    InvalidDenominations(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ProjectionError>;
