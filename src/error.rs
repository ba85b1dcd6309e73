use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenetradeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Gene length mismatch for {ticker}: expected {expected}, got {actual}")]
    GeneLengthMismatch {
        ticker: String,
        expected: usize,
        actual: usize,
    },

    #[error("Instrument mismatch: {0}")]
    InstrumentMismatch(String),

    #[error("Insufficient survivors: {eligible} eligible agents, {required} required")]
    InsufficientSurvivors { eligible: usize, required: usize },

    #[error("Estimation error: {0}")]
    Estimation(String),

    #[error("Unknown estimator: {0}")]
    UnknownEstimator(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Insufficient data for {ticker}: have {have} rows, need {need}")]
    InsufficientData {
        ticker: String,
        have: usize,
        need: usize,
    },

    #[error("No prices for {0}")]
    MissingPrices(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenetradeError>;
