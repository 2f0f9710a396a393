//! Float engine with dithered output
//!
//! Samples are normalized to [0, 1] on the way in. On the way out each
//! pixel gets one uniform offset in [0, 1) added to all three of its
//! scaled channels before truncation, so the expected output equals the
//! exact float value.

use super::{PROGRESS_SATURATION, PROGRESS_SHARPENED, ToneMapper, stage_progress};
use crate::blur::blur_plane_f32;
use crate::control::{RunControl, RunResult};
use crate::curve::ToneCurve;
use crate::luminance::luminance_f32;
use crate::stretch::stretch_contrast_f32;
use crate::unsharp::unsharp_mask_f32;
use localcontrast_color::SaturationRemap;
use localcontrast_core::{Plane, RgbBuffer, ToneMappingParams};
use log::debug;
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;

/// Seed used when the caller does not pick one
pub const DEFAULT_DITHER_SEED: u64 = 0x5EED_70E5;

/// Integer sample type the float engine converts from and to
pub trait Sample: Copy + Default {
    /// Largest sample value
    const MAX: f32;

    fn to_f32(self) -> f32;

    /// Truncate a scaled value, saturating at 0 and `MAX`.
    fn from_scaled(v: f32) -> Self;
}

impl Sample for u8 {
    const MAX: f32 = 255.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_scaled(v: f32) -> Self {
        v as u8
    }
}

impl Sample for u16 {
    const MAX: f32 = 65535.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_scaled(v: f32) -> Self {
        v as u16
    }
}

/// Float engine for 8 and 16-bit images
#[derive(Debug)]
pub struct FloatToneMapper {
    rng: StdRng,
}

impl Default for FloatToneMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DITHER_SEED)
    }
}

impl FloatToneMapper {
    /// Create an engine whose dither sequence starts from `seed`.
    pub fn new(seed: u64) -> Self {
        FloatToneMapper {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restart the dither sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Convert integer samples to [0, 1].
    pub fn normalize<S: Sample>(image: &RgbBuffer<S>) -> RgbBuffer<f32> {
        let scale = 1.0 / S::MAX;
        image.map(|&v| v.to_f32() * scale)
    }

    /// Convert [0, 1] samples back to integers with per-pixel dithering.
    ///
    /// Each output sample is `floor(v * MAX + d)` clamped to `[0, MAX]`,
    /// with `d` drawn once per pixel.
    pub fn quantize<S: Sample>(
        &mut self,
        image: &RgbBuffer<f32>,
        out: &mut RgbBuffer<S>,
        control: &RunControl<'_>,
    ) -> RunResult<()> {
        let row_len = image.width() as usize * 3;
        for (src, dst) in image
            .data()
            .chunks_exact(row_len)
            .zip(out.data_mut().chunks_exact_mut(row_len))
        {
            control.check()?;
            for (px, opx) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
                let dither: f32 = StandardUniform.sample(&mut self.rng);
                for (&v, o) in px.iter().zip(opx.iter_mut()) {
                    *o = S::from_scaled((v * S::MAX + dither).clamp(0.0, S::MAX));
                }
            }
        }
        Ok(())
    }
}

impl ToneMapper for FloatToneMapper {
    type Sample = f32;

    fn name(&self) -> &'static str {
        "float"
    }

    fn process(
        &mut self,
        image: &mut RgbBuffer<f32>,
        params: &ToneMappingParams,
        preview_zoom: f32,
        control: &mut RunControl<'_>,
    ) -> RunResult<()> {
        let original = params.remaps_saturation().then(|| image.clone());

        if params.stretch_contrast() {
            let bounds = stretch_contrast_f32(image.data_mut(), control)?;
            debug!("contrast stretch {}..{}", bounds.min, bounds.max);
        }

        let mut lum: Plane<f32> = image.plane();
        for (i, stage) in params.stages().iter().enumerate() {
            control.check()?;
            if stage.enabled() {
                debug!("stage {i}: power {} blur {}", stage.power(), stage.blur());
                luminance_f32(image, &mut lum, control)?;
                blur_plane_f32(&mut lum, stage.blur() / preview_zoom, control)?;
                let curve = ToneCurve::new(params.function(), stage.warped_power());
                apply_curve(image, &lum, curve, control)?;
            }
            control.report(stage_progress(i));
        }

        if let Some(original) = original {
            let remap = SaturationRemap::new(params.low_saturation(), params.high_saturation());
            remap_saturation(&remap, &original, image, control)?;
        }
        control.report(PROGRESS_SATURATION);

        if params.unsharp_mask().enabled() {
            unsharp_mask_f32(image, params.unsharp_mask(), preview_zoom, control)?;
        }
        control.report(PROGRESS_SHARPENED);
        Ok(())
    }
}

fn apply_curve(
    image: &mut RgbBuffer<f32>,
    lum: &Plane<f32>,
    curve: ToneCurve,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let w = image.width() as usize;
    for (row, lrow) in image
        .data_mut()
        .chunks_exact_mut(w * 3)
        .zip(lum.data().chunks_exact(w))
    {
        control.check()?;
        for (px, &l) in row.chunks_exact_mut(3).zip(lrow) {
            for c in px.iter_mut() {
                *c = curve.eval(*c, l);
            }
        }
    }
    Ok(())
}

fn remap_saturation(
    remap: &SaturationRemap,
    original: &RgbBuffer<f32>,
    image: &mut RgbBuffer<f32>,
    control: &RunControl<'_>,
) -> RunResult<()> {
    let row_len = image.width() as usize * 3;
    for (orow, row) in original
        .data()
        .chunks_exact(row_len)
        .zip(image.data_mut().chunks_exact_mut(row_len))
    {
        control.check()?;
        for (o, px) in orow.chunks_exact(3).zip(row.chunks_exact_mut(3)) {
            remap.remap_pixel([o[0], o[1], o[2]], px);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let image = RgbBuffer::from_data(1, 1, vec![0u16, 65535, 32768]).unwrap();
        let f = FloatToneMapper::normalize(&image);
        assert_eq!(f.data()[0], 0.0);
        assert_eq!(f.data()[1], 1.0);
        assert!((f.data()[2] - 0.500008).abs() < 1e-5);
    }

    #[test]
    fn test_quantize_exact_values() {
        let mut engine = FloatToneMapper::default();
        let image = RgbBuffer::from_data(2, 1, vec![0.0, 1.0, 2.0, -1.0, 0.5, 1.0]).unwrap();
        let mut out = RgbBuffer::<u8>::new(2, 1).unwrap();
        engine.quantize(&image, &mut out, &RunControl::new()).unwrap();
        let d = out.data();
        assert_eq!(d[0], 0);
        assert_eq!(d[1], 255);
        assert_eq!(d[2], 255);
        assert_eq!(d[3], 0);
        assert!(d[4] == 127 || d[4] == 128);
        assert_eq!(d[5], 255);
    }

    #[test]
    fn test_same_seed_same_output() {
        let image = RgbBuffer::from_data(4, 4, vec![0.37f32; 48]).unwrap();
        let mut a = RgbBuffer::<u16>::new(4, 4).unwrap();
        let mut b = RgbBuffer::<u16>::new(4, 4).unwrap();
        FloatToneMapper::new(7)
            .quantize(&image, &mut a, &RunControl::new())
            .unwrap();
        let mut engine = FloatToneMapper::new(99);
        engine.reseed(7);
        engine.quantize(&image, &mut b, &RunControl::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dither_shared_within_pixel() {
        let mut engine = FloatToneMapper::new(3);
        let image = RgbBuffer::from_data(8, 8, vec![100.5f32 / 255.0; 192]).unwrap();
        let mut out = RgbBuffer::<u8>::new(8, 8).unwrap();
        engine.quantize(&image, &mut out, &RunControl::new()).unwrap();
        for px in out.pixels() {
            assert!(px[0] == px[1] && px[1] == px[2]);
            assert!(px[0] == 100 || px[0] == 101);
        }
    }

    #[test]
    fn test_process_stage_darkens_bright_surroundings() {
        let mut params = ToneMappingParams::default();
        params.set_stretch_contrast(false);
        params.stage_mut(0).unwrap().set_power(80.0);

        let mut image = RgbBuffer::from_data(3, 3, vec![0.8f32; 27]).unwrap();
        let mut engine = FloatToneMapper::default();
        engine
            .process(&mut image, &params, 1.0, &mut RunControl::new())
            .unwrap();
        assert!(image.data().iter().all(|&v| v < 0.8 && v > 0.0));
    }
}
