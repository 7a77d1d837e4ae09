//! Error types for the imbalanced learning library

use crate::models::Label;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Desired class distribution is not a valid probability distribution
    #[error("Invalid desired distribution: {0}")]
    InvalidDistribution(String),

    /// An observed label has no entry in the desired distribution
    #[error("Label {0} is not present in the desired distribution")]
    UnknownLabel(Label),

    /// Invalid configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Data parsing error
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
