//! Error type shared by all demonstrations.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("missing data: {0}")]
    MissingData(String),
    #[error("solver failed: {0}")]
    Solver(String),
    #[error("plotting failed: {0}")]
    Plot(String),
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),
}

/// `plotters` errors are generic over the drawing backend, so they are
/// flattened to their message here.
pub fn plot_err<E: std::fmt::Display>(e: E) -> DemoError {
    DemoError::Plot(e.to_string())
}
