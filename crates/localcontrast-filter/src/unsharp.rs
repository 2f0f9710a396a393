//! Unsharp mask on luminance
//!
//! The difference between a pixel's luminance and its blurred luminance,
//! scaled by `2.5 * warped_power`, is added to all three channels. A soft
//! threshold suppresses small differences:
//!
//! ```text
//! |d| >= threshold:                 d
//! threshold/2 < |d| < threshold:    sign(d) * (|d| - threshold/2) * 2
//! |d| <= threshold/2:               0
//! ```
//!
//! with `threshold = threshold_param * power / 250`.

use crate::blur::{blur_plane_f32, blur_plane_fixed};
use crate::control::{RunControl, RunResult};
use crate::luminance::{luminance_f32, luminance_u8};
use localcontrast_core::{Plane, RgbBuffer, UnsharpMaskParams};

/// Gain applied on top of the warped power
const POWER_GAIN: f32 = 2.5;

/// Divisor turning the threshold setting into a difference
const THRESHOLD_DIVISOR: f32 = 250.0;

/// Derived float gain and thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsharpGate {
    power: f32,
    threshold: f32,
}

impl UnsharpGate {
    pub fn new(params: &UnsharpMaskParams) -> Self {
        let power = POWER_GAIN * params.warped_power();
        UnsharpGate {
            power,
            threshold: params.threshold() as f32 * power / THRESHOLD_DIVISOR,
        }
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Scaled and gated correction for luminance `val` blurred to `blurred`.
    #[inline]
    pub fn correction(&self, val: f32, blurred: f32) -> f32 {
        let dval = (val - blurred) * self.power;
        let abs = dval.abs();
        if abs < self.threshold {
            let half = self.threshold * 0.5;
            if abs > half {
                dval.signum() * (abs - half) * 2.0
            } else {
                0.0
            }
        } else {
            dval
        }
    }
}

/// Integer counterpart of [`UnsharpGate`] in 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsharpGateFixed {
    power: i64,
    threshold: i64,
}

impl UnsharpGateFixed {
    pub fn new(params: &UnsharpMaskParams) -> Self {
        let power = (POWER_GAIN * 65536.0 * params.warped_power()) as i64;
        UnsharpGateFixed {
            power,
            threshold: params.threshold() as i64 * power / THRESHOLD_DIVISOR as i64,
        }
    }

    /// Gated correction in whole sample units.
    #[inline]
    pub fn correction(&self, val: i32, blurred: i32) -> i32 {
        let dval = (val - blurred) as i64 * self.power;
        let abs = dval.abs();
        let gated = if abs < self.threshold {
            let half = self.threshold / 2;
            if abs > half {
                dval.signum() * (abs - half) * 2
            } else {
                0
            }
        } else {
            dval
        };
        (gated >> 16) as i32
    }
}

/// Sharpen a float image in place.
pub fn unsharp_mask_f32(
    image: &mut RgbBuffer<f32>,
    params: &UnsharpMaskParams,
    preview_zoom: f32,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let gate = UnsharpGate::new(params);

    let mut lum: Plane<f32> = image.plane();
    luminance_f32(image, &mut lum, control)?;
    let original = lum.data().to_vec();
    blur_plane_f32(&mut lum, params.blur() / preview_zoom, control)?;

    let row_len = image.width() as usize;
    for ((row, val), blurred) in image
        .data_mut()
        .chunks_exact_mut(row_len * 3)
        .zip(original.chunks_exact(row_len))
        .zip(lum.data().chunks_exact(row_len))
    {
        control.check()?;
        for ((px, &v), &b) in row.chunks_exact_mut(3).zip(val).zip(blurred) {
            let d = gate.correction(v, b);
            for c in px.iter_mut() {
                *c = (*c + d).clamp(0.0, 1.0);
            }
        }
    }
    Ok(())
}

/// Sharpen an 8-bit image in place.
pub fn unsharp_mask_u8(
    image: &mut RgbBuffer<u8>,
    params: &UnsharpMaskParams,
    preview_zoom: f32,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let gate = UnsharpGateFixed::new(params);

    let mut lum: Plane<i32> = image.plane();
    luminance_u8(image, &mut lum, control)?;
    let original = lum.data().to_vec();
    blur_plane_fixed(&mut lum, params.blur() / preview_zoom, control)?;

    let row_len = image.width() as usize;
    for ((row, val), blurred) in image
        .data_mut()
        .chunks_exact_mut(row_len * 3)
        .zip(original.chunks_exact(row_len))
        .zip(lum.data().chunks_exact(row_len))
    {
        control.check()?;
        for ((px, &v), &b) in row.chunks_exact_mut(3).zip(val).zip(blurred) {
            let d = gate.correction(v, b);
            for c in px.iter_mut() {
                *c = (*c as i32 + d).clamp(0, 255) as u8;
            }
        }
    }
    Ok(())
}
