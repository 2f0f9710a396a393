//! Luminance planes
//!
//! Both engines steer the tone curves by the unweighted channel mean.

use crate::control::{RunControl, RunResult};
use localcontrast_core::{Plane, RgbBuffer};

/// Fill `plane` with `(r + g + b) / 3` of each float pixel.
pub fn luminance_f32(
    image: &RgbBuffer<f32>,
    plane: &mut Plane<f32>,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let w = image.width() as usize;
    for (src, dst) in image
        .data()
        .chunks_exact(w * 3)
        .zip(plane.data_mut().chunks_exact_mut(w))
    {
        control.check()?;
        for (px, l) in src.chunks_exact(3).zip(dst.iter_mut()) {
            *l = (px[0] + px[1] + px[2]) / 3.0;
        }
    }
    Ok(())
}

/// Fill `plane` with the truncated mean `(r + g + b) / 3` of each 8-bit pixel.
pub fn luminance_u8(
    image: &RgbBuffer<u8>,
    plane: &mut Plane<i32>,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let w = image.width() as usize;
    for (src, dst) in image
        .data()
        .chunks_exact(w * 3)
        .zip(plane.data_mut().chunks_exact_mut(w))
    {
        control.check()?;
        for (px, l) in src.chunks_exact(3).zip(dst.iter_mut()) {
            *l = (px[0] as i32 + px[1] as i32 + px[2] as i32) / 3;
        }
    }
    Ok(())
}
