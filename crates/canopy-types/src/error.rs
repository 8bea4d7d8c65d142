//! Error types for parsing and conversions.

use thiserror::Error;

/// Errors from parsing or converting foundation types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The input had the wrong byte length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
