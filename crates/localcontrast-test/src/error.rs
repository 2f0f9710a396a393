//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error while building a test image
    #[error("core error: {0}")]
    Core(#[from] localcontrast_core::Error),

    /// Two buffers cannot be compared sample by sample
    #[error("buffer layout mismatch: {0}")]
    LayoutMismatch(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
