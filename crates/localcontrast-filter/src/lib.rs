//! localcontrast-filter - Local contrast tone mapping
//!
//! This crate provides the tone mapping passes and the filter that runs
//! them:
//!
//! - Tone curves and their 8-bit lookup tables
//! - Recursive exponential blur (float and fixed point)
//! - Contrast stretch, unsharp mask and luminance planes
//! - Fixed-point and float engines behind the [`ToneMapper`] trait
//! - [`LocalContrastFilter`], the driver with cancellation and progress

pub mod blur;
pub mod control;
pub mod curve;
pub mod engine;
mod error;
pub mod filter;
pub mod lut;
pub mod luminance;
pub mod stretch;
pub mod unsharp;

pub use control::{Cancelled, RunControl, RunResult};
pub use curve::{ToneCurve, tone_curve};
pub use engine::{FixedPointToneMapper, FloatToneMapper, ToneMapper};
pub use error::{FilterError, FilterResult};
pub use filter::{FilterOutcome, LocalContrastFilter};
pub use lut::{ToneLut, ToneLutCache};

// Re-export commonly used functions
pub use blur::{blur_plane_f32, blur_plane_fixed};
pub use stretch::{StretchBounds, stretch_contrast_f32, stretch_contrast_u8};
pub use unsharp::{unsharp_mask_f32, unsharp_mask_u8};
