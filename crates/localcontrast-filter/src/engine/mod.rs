//! Tone mapping engines
//!
//! Two interchangeable engines run the same pipeline on a packed RGB
//! working buffer:
//!
//! 1. contrast stretch (optional)
//! 2. up to [`MAX_STAGES`] local contrast stages, in index order
//! 3. saturation remap against the pre-stretch pixels (optional)
//! 4. unsharp mask (optional)
//!
//! [`FixedPointToneMapper`] works on 8-bit samples with tabulated curves
//! and integer arithmetic; [`FloatToneMapper`] works on samples
//! normalized to [0, 1] and dithers on the way back.
//!
//! [`MAX_STAGES`]: localcontrast_core::MAX_STAGES

mod fixed;
mod float;

pub use fixed::FixedPointToneMapper;
pub use float::{DEFAULT_DITHER_SEED, FloatToneMapper, Sample};

use crate::control::{RunControl, RunResult};
use localcontrast_core::{RgbBuffer, ToneMappingParams};

/// Progress after the input has been de-interleaved
pub const PROGRESS_UNPACKED: u32 = 10;
/// Progress after conversion to the engine's working precision
pub const PROGRESS_CONVERTED: u32 = 20;
/// Progress after the saturation remap
pub const PROGRESS_SATURATION: u32 = 70;
/// Progress after the unsharp mask
pub const PROGRESS_SHARPENED: u32 = 80;
/// Progress after conversion back to the output precision
pub const PROGRESS_CONVERTED_BACK: u32 = 90;
/// Progress of a finished run
pub const PROGRESS_DONE: u32 = 100;

/// Progress after stage `index`
pub fn stage_progress(index: usize) -> u32 {
    30 + 10 * index as u32
}

/// A tone mapping engine working on samples of type `Self::Sample`
pub trait ToneMapper {
    type Sample: Copy;

    /// Short name for log messages.
    fn name(&self) -> &'static str;

    /// Run the pipeline on `image` in place.
    ///
    /// Blur radii are divided by `preview_zoom`. Returns `Err(Cancelled)`
    /// as soon as `control` reports cancellation; `image` is then left in
    /// an unspecified state.
    fn process(
        &mut self,
        image: &mut RgbBuffer<Self::Sample>,
        params: &ToneMappingParams,
        preview_zoom: f32,
        control: &mut RunControl<'_>,
    ) -> RunResult<()>;
}
