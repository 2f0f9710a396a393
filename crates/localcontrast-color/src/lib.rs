//! localcontrast-color - Color processing for local contrast tone mapping
//!
//! - **Color space conversion** ([`colorspace`]): RGB <-> HSV in float and
//!   8-bit integer precision
//! - **Saturation remapping** ([`saturation`]): tames the saturation gain
//!   of the tone mapping stages separately in shadows and highlights

pub mod colorspace;
pub mod error;
pub mod saturation;

// Re-export core types
pub use localcontrast_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export color space types and functions
pub use colorspace::{
    // Types
    Hsv,
    HsvInt,
    // Pixel-level conversions
    hsv_to_rgb,
    hsv_to_rgb_int,
    rgb_to_hsv,
    rgb_to_hsv_int,
};

pub use saturation::SaturationRemap;
