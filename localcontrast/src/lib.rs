//! localcontrast - Local contrast enhancement and LDR tone mapping
//!
//! Compresses the dynamic range of an 8 or 16-bit RGB image while
//! boosting local contrast: each sample is remapped by a tone curve
//! steered by the blurred luminance of its neighborhood, in up to four
//! stages, followed by optional saturation remapping and sharpening.
//!
//! # Overview
//!
//! - [`ToneMappingParams`] - Stage settings, saturation limits, tone
//!   function and unsharp mask; text and key/value serialization
//! - [`filter::LocalContrastFilter`] - Runs the pipeline on a
//!   [`PixelBuffer`], with cancellation and progress reporting
//! - [`color`] - RGB/HSV conversion and the saturation remap
//!
//! # Example
//!
//! ```
//! use localcontrast::{PixelBuffer, ToneMappingParams};
//! use localcontrast::filter::LocalContrastFilter;
//!
//! let data: Vec<u8> = (0..16 * 16 * 3).map(|i| (i % 256) as u8).collect();
//! let src = PixelBuffer::from_u8(16, 16, 3, data).unwrap();
//!
//! let mut filter = LocalContrastFilter::new(ToneMappingParams::default());
//! let out = filter.apply(&src).unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use localcontrast_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use localcontrast_color as color;
pub use localcontrast_filter as filter;
