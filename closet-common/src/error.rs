//! Common error types for the closet

use thiserror::Error;

/// Common result type for closet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the inventory store and its callers
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Inventory file could not be read or written as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Inventory file has an unexpected layout
    #[error("Inventory format error: {0}")]
    Format(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or contradictory user input
    #[error("Validation error: {0}")]
    Validation(String),
}
