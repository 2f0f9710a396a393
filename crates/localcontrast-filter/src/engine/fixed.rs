//! 8-bit engine with tabulated tone curves

use super::{PROGRESS_CONVERTED, PROGRESS_SATURATION, PROGRESS_SHARPENED, ToneMapper, stage_progress};
use crate::blur::blur_plane_fixed;
use crate::control::{RunControl, RunResult};
use crate::lut::{ToneLut, ToneLutCache};
use crate::luminance::luminance_u8;
use crate::stretch::stretch_contrast_u8;
use crate::unsharp::unsharp_mask_u8;
use localcontrast_color::SaturationRemap;
use localcontrast_core::{Plane, RgbBuffer, ToneMappingParams};
use log::debug;

/// Integer engine for 8-bit images
///
/// Keeps its lookup tables between runs, so repeated runs with the same
/// curves only pay for the blur and table lookups.
#[derive(Debug, Clone, Default)]
pub struct FixedPointToneMapper {
    luts: ToneLutCache,
}

impl FixedPointToneMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn luts(&self) -> &ToneLutCache {
        &self.luts
    }

    pub fn luts_mut(&mut self) -> &mut ToneLutCache {
        &mut self.luts
    }
}

impl ToneMapper for FixedPointToneMapper {
    type Sample = u8;

    fn name(&self) -> &'static str {
        "fixed-point"
    }

    fn process(
        &mut self,
        image: &mut RgbBuffer<u8>,
        params: &ToneMappingParams,
        preview_zoom: f32,
        control: &mut RunControl<'_>,
    ) -> RunResult<()> {
        self.luts.prepare(params);
        control.report(PROGRESS_CONVERTED);

        let original = params.remaps_saturation().then(|| image.clone());

        if params.stretch_contrast() {
            let bounds = stretch_contrast_u8(image.data_mut(), control)?;
            debug!("contrast stretch {}..{}", bounds.min, bounds.max);
        }

        let mut lum: Plane<i32> = image.plane();
        for (i, stage) in params.stages().iter().enumerate() {
            control.check()?;
            if let Some(lut) = self.luts.get(i).filter(|_| stage.enabled()) {
                debug!("stage {i}: power {} blur {}", stage.power(), stage.blur());
                luminance_u8(image, &mut lum, control)?;
                blur_plane_fixed(&mut lum, stage.blur() / preview_zoom, control)?;
                apply_lut(image, &lum, lut, control)?;
            }
            control.report(stage_progress(i));
        }

        if let Some(original) = original {
            let remap = SaturationRemap::new(params.low_saturation(), params.high_saturation());
            remap_saturation(&remap, &original, image, control)?;
        }
        control.report(PROGRESS_SATURATION);

        if params.unsharp_mask().enabled() {
            unsharp_mask_u8(image, params.unsharp_mask(), preview_zoom, control)?;
        }
        control.report(PROGRESS_SHARPENED);
        Ok(())
    }
}

fn apply_lut(
    image: &mut RgbBuffer<u8>,
    lum: &Plane<i32>,
    lut: &ToneLut,
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
            let l = l.clamp(0, 255) as u8;
            for c in px.iter_mut() {
                *c = lut.map(*c, l);
            }
        }
    }
    Ok(())
}

fn remap_saturation(
    remap: &SaturationRemap,
    original: &RgbBuffer<u8>,
    image: &mut RgbBuffer<u8>,
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
            remap.remap_pixel_u8([o[0], o[1], o[2]], px);
        }
    }
    Ok(())
}
