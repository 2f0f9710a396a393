//! Recursive exponential blur
//!
//! A first-order IIR filter run forward and backward along every row and
//! then every column approximates a Gaussian at a cost independent of
//! the radius:
//!
//! ```text
//! old = data * (1 - a) + old * a
//! ```
//!
//! The float blur derives `a = exp(ln(0.25) / radius)`, squares it and
//! runs the four sweeps twice. The fixed-point blur derives
//! `a = exp(ln(0.5) / radius * sqrt(2))` in 16-bit fixed point and runs
//! the four sweeps once on samples carried with 8 fractional bits.
//!
//! Radii below [`MIN_BLUR_RADIUS`] leave the plane untouched. Both blurs
//! poll the [`RunControl`] once per row and once per column.

use crate::control::{RunControl, RunResult};
use localcontrast_core::Plane;
use log::debug;

/// Smallest radius that still blurs
pub const MIN_BLUR_RADIUS: f32 = 0.3;

/// Number of four-sweep passes of the float blur
const FLOAT_PASSES: usize = 2;

/// Added at each float step to keep the recursion out of denormals
const DENORMAL_GUARD: f32 = 1e-15;

/// One in 16-bit fixed point
const FIXED_ONE: i64 = 1 << 16;

/// Fractional bits of samples inside the fixed-point blur
const SAMPLE_SHIFT: u32 = 8;

/// Feedback coefficient of the float blur, or `None` when it would not blur.
pub fn float_blur_coefficient(radius: f32) -> Option<f32> {
    // `!(>=)` also rejects NaN
    if !(radius >= MIN_BLUR_RADIUS) {
        return None;
    }
    let a = (0.25f32.ln() / radius).exp();
    if a <= 0.0 || a >= 1.0 {
        return None;
    }
    Some(a * a)
}

/// Feedback coefficient of the fixed-point blur, scaled by 65536.
pub fn fixed_blur_coefficient(radius: f32) -> Option<i64> {
    if !(radius >= MIN_BLUR_RADIUS) {
        return None;
    }
    let af = (0.5f32.ln() / radius * std::f32::consts::SQRT_2).exp();
    if af <= 0.0 || af >= 1.0 {
        return None;
    }
    let a = (FIXED_ONE as f32 * af) as i64;
    (a > 0).then_some(a)
}

/// Blur a float plane in place.
pub fn blur_plane_f32(plane: &mut Plane<f32>, radius: f32, control: &RunControl<'_>) -> RunResult<()> {
    let Some(a) = float_blur_coefficient(radius) else {
        debug!("float blur skipped for radius {radius}");
        return Ok(());
    };

    let w = plane.width() as usize;
    let h = plane.height() as usize;
    let data = plane.data_mut();

    for _ in 0..FLOAT_PASSES {
        for row in data.chunks_exact_mut(w) {
            control.check()?;
            sweep_f32(row.iter_mut(), a);
            sweep_f32(row.iter_mut().rev(), a);
        }
        for x in 0..w {
            control.check()?;
            sweep_f32(data[x..].iter_mut().step_by(w).take(h), a);
            sweep_f32(data[x..].iter_mut().step_by(w).take(h).rev(), a);
        }
    }
    Ok(())
}

/// Blur an 8-bit luminance plane (values 0..=255) in place.
///
/// Samples are shifted left by 8 bits once, kept at that scale through
/// all four sweeps, and rounded back once at the end, so the sweeps do
/// not each truncate.
pub fn blur_plane_fixed(
    plane: &mut Plane<i32>,
    radius: f32,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let Some(a) = fixed_blur_coefficient(radius) else {
        debug!("fixed-point blur skipped for radius {radius}");
        return Ok(());
    };

    let w = plane.width() as usize;
    let h = plane.height() as usize;
    let data = plane.data_mut();

    for v in data.iter_mut() {
        *v <<= SAMPLE_SHIFT;
    }

    for row in data.chunks_exact_mut(w) {
        control.check()?;
        sweep_fixed(row.iter_mut(), a);
        sweep_fixed(row.iter_mut().rev(), a);
    }
    for x in 0..w {
        control.check()?;
        sweep_fixed(data[x..].iter_mut().step_by(w).take(h), a);
        sweep_fixed(data[x..].iter_mut().step_by(w).take(h).rev(), a);
    }

    let half = 1 << (SAMPLE_SHIFT - 1);
    for v in data.iter_mut() {
        *v = (*v + half) >> SAMPLE_SHIFT;
    }
    Ok(())
}

fn sweep_f32<'a>(mut samples: impl Iterator<Item = &'a mut f32>, a: f32) {
    let Some(first) = samples.next() else {
        return;
    };
    let mut old = *first;
    for v in samples {
        old = *v * (1.0 - a) + old * a + DENORMAL_GUARD;
        *v = old;
    }
}

fn sweep_fixed<'a>(mut samples: impl Iterator<Item = &'a mut i32>, a: i64) {
    let Some(first) = samples.next() else {
        return;
    };
    let mut old = *first as i64;
    for v in samples {
        old = (*v as i64 * (FIXED_ONE - a) + old * a) >> 16;
        *v = old as i32;
    }
}
