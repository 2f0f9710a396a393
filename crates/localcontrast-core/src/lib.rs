//! localcontrast-core - Basic data structures for local contrast tone mapping
//!
//! This crate provides the data structures shared by the tone mapping
//! crates:
//!
//! - [`PixelBuffer`] - Interleaved 8/16-bit RGB or RGBA image handed in by
//!   the caller
//! - [`RgbBuffer`] / [`Plane`] - Packed working buffers used by the engines
//! - [`ToneMappingParams`] - The parameter model, with text and key/value
//!   serialization

pub mod buffer;
pub mod error;
pub mod params;
pub mod planes;

pub use buffer::{BitDepth, PixelBuffer, PixelData};
pub use error::{Error, Result};
pub use params::{
    MAX_STAGES, StageParams, ToneFunction, ToneMappingParams, UnsharpMaskParams,
};
pub use planes::{Plane, RgbBuffer};
