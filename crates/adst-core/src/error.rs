//! Error types for adst-core construction and decoding paths.
//!
//! The conversion and evaluation functions are total and never fail; only the
//! validating constructors, the packed decoder and the chrono interop return
//! these errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdstError {
    /// A DST rule field is outside its nominal range.
    #[error("Invalid DST rule: {field} = {value}")]
    InvalidRule { field: &'static str, value: u8 },

    #[error("Invalid calendar record: {0}")]
    InvalidRecord(String),

    /// A packed rule buffer has the wrong length.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A mode or preset name that does not exist.
    #[error("Unknown name: {0}")]
    UnknownName(String),

    /// A date lies outside the 32-bit elapsed-seconds range (1970..=2106).
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, AdstError>;
