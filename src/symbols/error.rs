use thiserror::Error;

/// Failures of the symbol core.
///
/// Non-numeric values are not an error here: they coerce to `NaN` and
/// produce an undrawn marker instead of aborting the render pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymbolError {
    /// No property key of the sample feature looks like a year.
    #[error("no year attributes found in dataset")]
    EmptyResult,

    /// A selector index outside `[0, len - 1]`.
    #[error("index {index} out of range for {len} attributes")]
    OutOfRange { index: i64, len: usize },

    /// Statistics requested for an attribute no feature carries.
    #[error("no feature carries attribute '{attribute}'")]
    EmptySet { attribute: String },
}

/// Result type for symbol operations.
pub type SymbolResult<T> = Result<T, SymbolError>;
