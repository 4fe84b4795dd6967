//! Error types for jetlag-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JetlagError {
    #[error("Invalid trip: {0}")]
    InvalidTrip(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, JetlagError>;
