//! Saturation remapping after local contrast stages
//!
//! Local contrast stages tend to oversaturate. The remap blends each
//! pixel's saturation between the value it had before the stages
//! (original) and the value after them (result):
//!
//! ```text
//! high = 100 - high_saturation
//! sat  = (orig_s * high + result_s * (100 - high)) / 100
//! if result_v > orig_v:                       // pixel was brightened
//!     low = 100 - low_saturation
//!     s1  = sat * orig_v / (result_v + eps)
//!     sat = (low * s1 + low_saturation * sat) / 100
//! pixel = hsv(result_h, sat, result_v)
//! ```
//!
//! With both settings at 100 the remap is the identity and callers skip it.

use crate::colorspace::{Hsv, HsvInt, hsv_to_rgb, hsv_to_rgb_int, rgb_to_hsv, rgb_to_hsv_int};
use crate::{ColorError, ColorResult};
use localcontrast_core::RgbBuffer;

/// Guard added to the result value in the float soft-saturation divisor
const VALUE_EPSILON: f32 = 1.0 / 255.0 * 0.1;

/// Saturation limits, both in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturationRemap {
    low_saturation: i32,
    high_saturation: i32,
}

impl SaturationRemap {
    /// Create a remap; values are clamped to [0, 100].
    pub fn new(low_saturation: u32, high_saturation: u32) -> Self {
        SaturationRemap {
            low_saturation: low_saturation.min(100) as i32,
            high_saturation: high_saturation.min(100) as i32,
        }
    }

    /// Whether the remap leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        self.low_saturation == 100 && self.high_saturation == 100
    }

    /// Remap one float pixel in place.
    ///
    /// `orig` is the pixel before the tone mapping stages, `result` the
    /// pixel after them; both in [0, 1].
    pub fn remap_pixel(&self, orig: [f32; 3], result: &mut [f32]) {
        let src = rgb_to_hsv(orig[0], orig[1], orig[2]);
        let dst = rgb_to_hsv(result[0], result[1], result[2]);

        let high = (100 - self.high_saturation) as f32;
        let mut sat = (src.s * high + dst.s * (100.0 - high)) * 0.01;

        if dst.v > src.v {
            let low = (100 - self.low_saturation) as f32;
            let s1 = sat * src.v / (dst.v + VALUE_EPSILON);
            sat = (low * s1 + self.low_saturation as f32 * sat) * 0.01;
        }

        let rgb = hsv_to_rgb(Hsv::new(dst.h, sat, dst.v));
        result[..3].copy_from_slice(&rgb);
    }

    /// Remap one 8-bit pixel in place, in integer arithmetic.
    pub fn remap_pixel_u8(&self, orig: [u8; 3], result: &mut [u8]) {
        let src = rgb_to_hsv_int(orig[0], orig[1], orig[2]);
        let dst = rgb_to_hsv_int(result[0], result[1], result[2]);

        let high = 100 - self.high_saturation;
        let mut sat = (src.s * high + dst.s * (100 - high)) / 100;

        if dst.v > src.v {
            let low = 100 - self.low_saturation;
            let s1 = sat * src.v / (dst.v + 1);
            sat = (low * s1 + self.low_saturation * sat) / 100;
        }

        let (r, g, b) = hsv_to_rgb_int(HsvInt {
            h: dst.h,
            s: sat,
            v: dst.v,
        });
        result[0] = r;
        result[1] = g;
        result[2] = b;
    }

    /// Remap a whole float buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::DimensionMismatch`] if the buffers differ in size.
    pub fn apply(&self, orig: &RgbBuffer<f32>, result: &mut RgbBuffer<f32>) -> ColorResult<()> {
        check_sizes(orig.width(), orig.height(), result.width(), result.height())?;
        for (o, r) in orig.pixels().zip(result.pixels_mut()) {
            self.remap_pixel([o[0], o[1], o[2]], r);
        }
        Ok(())
    }

    /// Remap a whole 8-bit buffer.
    pub fn apply_u8(&self, orig: &RgbBuffer<u8>, result: &mut RgbBuffer<u8>) -> ColorResult<()> {
        check_sizes(orig.width(), orig.height(), result.width(), result.height())?;
        for (o, r) in orig.pixels().zip(result.pixels_mut()) {
            self.remap_pixel_u8([o[0], o[1], o[2]], r);
        }
        Ok(())
    }
}

fn check_sizes(w1: u32, h1: u32, w2: u32, h2: u32) -> ColorResult<()> {
    if (w1, h1) != (w2, h2) {
        return Err(ColorError::DimensionMismatch {
            expected: (w1, h1),
            actual: (w2, h2),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_flag() {
        assert!(SaturationRemap::new(100, 100).is_identity());
        assert!(!SaturationRemap::new(100, 99).is_identity());
        assert_eq!(SaturationRemap::new(300, 5), SaturationRemap::new(100, 5));
    }

    #[test]
    fn test_identity_remap_keeps_pixel() {
        let remap = SaturationRemap::new(100, 100);
        let mut px = [0.8, 0.3, 0.1];
        remap.remap_pixel([0.6, 0.5, 0.4], &mut px);
        assert!((px[0] - 0.8).abs() < 1e-5);
        assert!((px[1] - 0.3).abs() < 1e-5);
        assert!((px[2] - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_zero_high_saturation_restores_original_saturation() {
        // high_saturation = 0 takes the original saturation; the pixel did
        // not brighten, so the shadow term does not apply.
        let remap = SaturationRemap::new(100, 0);
        let orig = [0.5, 0.25, 0.25];
        let mut px = [0.4, 0.0, 0.0];
        remap.remap_pixel(orig, &mut px);
        let hsv = rgb_to_hsv(px[0], px[1], px[2]);
        assert!((hsv.s - 0.5).abs() < 1e-5, "saturation {}", hsv.s);
        assert!((hsv.v - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_low_saturation_tames_brightened_pixel() {
        let remap = SaturationRemap::new(0, 100);
        let orig = [0.2, 0.1, 0.1];
        let mut px = [0.8, 0.4, 0.4];
        remap.remap_pixel(orig, &mut px);
        let hsv = rgb_to_hsv(px[0], px[1], px[2]);
        // s1 = 0.5 * 0.2 / 0.8 = 0.125
        assert!((hsv.s - 0.125).abs() < 1e-3, "saturation {}", hsv.s);
    }

    #[test]
    fn test_u8_matches_float_roughly() {
        let remap = SaturationRemap::new(30, 60);
        let orig = [120u8, 60, 30];
        let mut px8 = [220u8, 90, 40];
        remap.remap_pixel_u8(orig, &mut px8);

        let mut pxf = [220.0 / 255.0, 90.0 / 255.0, 40.0 / 255.0];
        remap.remap_pixel([120.0 / 255.0, 60.0 / 255.0, 30.0 / 255.0], &mut pxf);
        for c in 0..3 {
            let f = (pxf[c] * 255.0).round() as i32;
            assert!((f - px8[c] as i32).abs() <= 3, "channel {c}: {f} vs {}", px8[c]);
        }
    }

    #[test]
    fn test_apply_size_mismatch() {
        let remap = SaturationRemap::new(50, 50);
        let a = RgbBuffer::<f32>::new(2, 2).unwrap();
        let mut b = RgbBuffer::<f32>::new(2, 3).unwrap();
        assert!(remap.apply(&a, &mut b).is_err());
    }
}
