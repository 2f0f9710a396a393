//! Local contrast filter driver
//!
//! [`LocalContrastFilter`] takes an interleaved 8 or 16-bit RGB(A)
//! [`PixelBuffer`], picks an engine, and writes the result back in the
//! input layout. Alpha samples are carried through unchanged.
//!
//! - fast mode on 8-bit input runs the [`FixedPointToneMapper`]
//! - everything else runs the [`FloatToneMapper`]
//! - fast mode on 16-bit input is rejected

use crate::control::RunControl;
use crate::engine::{
    DEFAULT_DITHER_SEED, FixedPointToneMapper, FloatToneMapper, PROGRESS_CONVERTED,
    PROGRESS_CONVERTED_BACK, PROGRESS_DONE, PROGRESS_UNPACKED, Sample, ToneMapper,
};
use crate::{FilterError, FilterResult};
use localcontrast_core::{PixelBuffer, PixelData, RgbBuffer, ToneMappingParams};
use log::debug;

/// Result of a filter run
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The run finished; the filtered image
    Applied(PixelBuffer),
    /// The run observed the cancellation flag and stopped
    Cancelled,
}

impl FilterOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FilterOutcome::Applied(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FilterOutcome::Cancelled)
    }

    /// The filtered image, if the run finished.
    pub fn into_buffer(self) -> Option<PixelBuffer> {
        match self {
            FilterOutcome::Applied(buf) => Some(buf),
            FilterOutcome::Cancelled => None,
        }
    }
}

/// Local contrast tone mapping filter
///
/// The filter owns both engines. The fixed-point engine's lookup tables
/// persist between runs; the float engine's dither sequence is restarted
/// from the configured seed at the start of every run, so equal inputs
/// give equal outputs.
#[derive(Debug)]
pub struct LocalContrastFilter {
    params: ToneMappingParams,
    preview_zoom: f32,
    dither_seed: u64,
    fixed: FixedPointToneMapper,
    float: FloatToneMapper,
}

impl LocalContrastFilter {
    pub fn new(params: ToneMappingParams) -> Self {
        LocalContrastFilter {
            params,
            preview_zoom: 1.0,
            dither_seed: DEFAULT_DITHER_SEED,
            fixed: FixedPointToneMapper::new(),
            float: FloatToneMapper::new(DEFAULT_DITHER_SEED),
        }
    }

    /// Set the preview zoom that blur radii are divided by.
    ///
    /// Values that are not finite and positive reset the zoom to 1.
    pub fn with_preview_zoom(mut self, zoom: f32) -> Self {
        self.set_preview_zoom(zoom);
        self
    }

    /// Set the seed of the float engine's dither sequence.
    pub fn with_dither_seed(mut self, seed: u64) -> Self {
        self.dither_seed = seed;
        self
    }

    pub fn params(&self) -> &ToneMappingParams {
        &self.params
    }

    /// Replace the parameters; tables for changed curves are rebuilt on
    /// the next run.
    pub fn set_params(&mut self, params: ToneMappingParams) {
        self.params = params;
    }

    pub fn preview_zoom(&self) -> f32 {
        self.preview_zoom
    }

    pub fn set_preview_zoom(&mut self, zoom: f32) {
        self.preview_zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
    }

    pub fn dither_seed(&self) -> u64 {
        self.dither_seed
    }

    /// The fixed-point engine, for inspecting or invalidating its tables.
    pub fn fixed_engine(&mut self) -> &mut FixedPointToneMapper {
        &mut self.fixed
    }

    /// Filter `src` without cancellation or progress reporting.
    pub fn apply(&mut self, src: &PixelBuffer) -> FilterResult<PixelBuffer> {
        let mut out = src.clone();
        self.apply_in_place(&mut out, &mut RunControl::new())?;
        Ok(out)
    }

    /// Filter `src` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedDepth`] for 16-bit input in fast
    /// mode.
    pub fn apply_with_control(
        &mut self,
        src: &PixelBuffer,
        control: &mut RunControl<'_>,
    ) -> FilterResult<FilterOutcome> {
        let mut out = src.clone();
        let finished = self.apply_in_place(&mut out, control)?;
        Ok(if finished {
            FilterOutcome::Applied(out)
        } else {
            FilterOutcome::Cancelled
        })
    }

    /// Filter `buf` in place.
    ///
    /// Returns `Ok(false)` if the run was cancelled; `buf` is then left
    /// unchanged.
    pub fn apply_in_place(
        &mut self,
        buf: &mut PixelBuffer,
        control: &mut RunControl<'_>,
    ) -> FilterResult<bool> {
        let fast = self.params.fast_mode();
        let layout = Layout {
            width: buf.width(),
            height: buf.height(),
            channels: buf.channels() as usize,
        };
        debug!(
            "local contrast on {}x{} {}-bit image, {} engine",
            layout.width,
            layout.height,
            buf.depth().bits(),
            if fast { self.fixed.name() } else { self.float.name() }
        );

        let finished = match buf.data_mut() {
            PixelData::Bit8(samples) if fast => self.run_fixed(samples, &layout, control)?,
            PixelData::Bit16(_) if fast => {
                return Err(FilterError::UnsupportedDepth {
                    expected: "8 bits per sample in fast mode",
                    actual: 16,
                });
            }
            PixelData::Bit8(samples) => self.run_float(samples, &layout, control)?,
            PixelData::Bit16(samples) => self.run_float(samples, &layout, control)?,
        };

        if finished {
            control.report(PROGRESS_DONE);
            debug!("local contrast run finished");
        } else {
            debug!("local contrast run cancelled");
        }
        Ok(finished)
    }

    fn run_fixed(
        &mut self,
        samples: &mut [u8],
        layout: &Layout,
        control: &mut RunControl<'_>,
    ) -> FilterResult<bool> {
        let mut image = unpack(samples, layout)?;
        control.report(PROGRESS_UNPACKED);

        let run = self
            .fixed
            .process(&mut image, &self.params, self.preview_zoom, control);
        if run.is_err() {
            return Ok(false);
        }
        control.report(PROGRESS_CONVERTED_BACK);

        pack(&image, samples, layout);
        Ok(true)
    }

    fn run_float<S: Sample>(
        &mut self,
        samples: &mut [S],
        layout: &Layout,
        control: &mut RunControl<'_>,
    ) -> FilterResult<bool> {
        let mut image = unpack(samples, layout)?;
        control.report(PROGRESS_UNPACKED);

        let mut work = FloatToneMapper::normalize(&image);
        control.report(PROGRESS_CONVERTED);

        self.float.reseed(self.dither_seed);
        let run = self
            .float
            .process(&mut work, &self.params, self.preview_zoom, control)
            .and_then(|()| self.float.quantize(&work, &mut image, control));
        if run.is_err() {
            return Ok(false);
        }
        control.report(PROGRESS_CONVERTED_BACK);

        pack(&image, samples, layout);
        Ok(true)
    }
}

/// Geometry of the interleaved input
struct Layout {
    width: u32,
    height: u32,
    channels: usize,
}

/// Copy the RGB samples into a packed buffer, dropping alpha.
fn unpack<S: Copy + Default>(samples: &[S], layout: &Layout) -> FilterResult<RgbBuffer<S>> {
    let data = samples
        .chunks_exact(layout.channels)
        .flat_map(|px| px[..3].iter().copied())
        .collect();
    Ok(RgbBuffer::from_data(layout.width, layout.height, data)?)
}

/// Write packed RGB samples back, leaving alpha untouched.
fn pack<S: Copy>(image: &RgbBuffer<S>, samples: &mut [S], layout: &Layout) {
    for (px, rgb) in samples
        .chunks_exact_mut(layout.channels)
        .zip(image.pixels())
    {
        px[..3].copy_from_slice(rgb);
    }
}
