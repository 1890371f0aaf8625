//! Error types for the claimsift crate.
//!
//! Filtering and sorting never fail: unparsable cells and missing columns are
//! absorbed by the engine. These errors only surface when host-supplied text
//! is turned into typed configuration or rows are assembled into a dataset.

use thiserror::Error;

/// Errors that can occur while building criteria or selector state from text.
#[derive(Debug, Error)]
pub enum SiftError {
    /// A date bound was not in `YYYY-MM-DD` form.
    #[error("invalid date bound '{value}': expected YYYY-MM-DD")]
    InvalidDateBound {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An amount bound could not be read as a number.
    #[error("invalid amount bound '{0}'")]
    InvalidAmountBound(String),

    /// A column kind name was not one of `text`, `date`, `currency`, `status`.
    #[error("unknown column kind '{0}'")]
    UnknownColumnKind(String),

    /// Two rows of a dataset share an id.
    #[error("duplicate row id '{0}'")]
    DuplicateRowId(String),

    /// A selector received a value outside its vocabulary.
    #[error("'{value}' is not a valid value for the {selector} selector")]
    UnknownSelectorValue {
        selector: &'static str,
        value: String,
    },
}

/// Result type for claimsift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
