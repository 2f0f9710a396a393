//! Error types for localcontrast-filter

use thiserror::Error;

/// Errors that can occur while running the local contrast filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] localcontrast_core::Error),

    /// Color library error
    #[error("color error: {0}")]
    Color(#[from] localcontrast_color::ColorError),

    /// Unsupported sample depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
