//! Error types for localcontrast-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Parameter values are never reported here: the parameter model clamps
//! them instead. Errors are reserved for caller contract violations
//! (bad buffer geometry) and malformed persisted parameters.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Unsupported bits per channel
    #[error("invalid bit depth: {0} bits per channel")]
    InvalidDepth(u32),

    /// Unsupported number of interleaved channels
    #[error("invalid channel count: {0} (expected 3 or 4)")]
    InvalidChannels(u32),

    /// Sample data does not match the declared geometry
    #[error("buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file decode error
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
