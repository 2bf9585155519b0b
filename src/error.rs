use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No record matches {criteria}")]
    NoMatch { criteria: String },

    #[error("Requested top {requested} but only {available} entries are available")]
    InsufficientData { requested: usize, available: usize },

    #[error("No temperatures within the range {low:.2}(C)-{high:.2}(C) for {scope}")]
    EmptyRange { low: f64, high: f64, scope: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Input cancelled by user")]
    Cancelled,
}

impl AnalysisError {
    /// Outcomes the caller should report and retry rather than abort on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::EmptyRange { .. })
    }
}
