//! Tone curve lookup tables for the 8-bit engine
//!
//! Each stage's curve is tabulated over every `(sample, luminance)` byte
//! pair, indexed `(sample << 8) | luminance`:
//!
//! ```text
//! lut[(x1 << 8) | x2] = round(curve(x1 / 255, x2 / 255) * 255)
//! ```
//!
//! A [`ToneLutCache`] keeps one table per stage and rebuilds it only when
//! the stage's warped power or the tone function changed, or when the
//! stage was invalidated explicitly.

use crate::curve::ToneCurve;
use localcontrast_core::{MAX_STAGES, ToneFunction, ToneMappingParams};
use log::trace;

/// Entries per table
pub const LUT_SIZE: usize = 256 * 256;

/// Tabulated tone curve
#[derive(Debug, Clone)]
pub struct ToneLut {
    function: ToneFunction,
    power_bits: u32,
    table: Box<[u8]>,
}

impl ToneLut {
    /// Tabulate `curve`.
    pub fn build(curve: ToneCurve) -> Self {
        let mut table = vec![0u8; LUT_SIZE].into_boxed_slice();
        for (x1, row) in table.chunks_exact_mut(256).enumerate() {
            let x1 = x1 as f32 / 255.0;
            for (x2, out) in row.iter_mut().enumerate() {
                let v = curve.eval(x1, x2 as f32 / 255.0) * 255.0 + 0.5;
                *out = v.clamp(0.0, 255.0) as u8;
            }
        }
        ToneLut {
            function: curve.function(),
            power_bits: curve.power().to_bits(),
            table,
        }
    }

    /// Map `sample` in a neighborhood of luminance `luminance`.
    #[inline]
    pub fn map(&self, sample: u8, luminance: u8) -> u8 {
        self.table[((sample as usize) << 8) | luminance as usize]
    }

    pub fn table(&self) -> &[u8] {
        &self.table
    }

    fn matches(&self, curve: &ToneCurve) -> bool {
        self.function == curve.function() && self.power_bits == curve.power().to_bits()
    }
}

/// Per-stage lookup tables that survive across runs
#[derive(Debug, Clone)]
pub struct ToneLutCache {
    entries: [Option<ToneLut>; MAX_STAGES],
    stale: [bool; MAX_STAGES],
    rebuilds: usize,
}

impl Default for ToneLutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneLutCache {
    pub fn new() -> Self {
        ToneLutCache {
            entries: std::array::from_fn(|_| None),
            stale: [false; MAX_STAGES],
            rebuilds: 0,
        }
    }

    /// Make sure every enabled stage has an up to date table.
    pub fn prepare(&mut self, params: &ToneMappingParams) {
        for (i, stage) in params.stages().iter().enumerate() {
            if !stage.enabled() {
                continue;
            }
            let curve = ToneCurve::new(params.function(), stage.warped_power());
            let fresh = !self.stale[i] && self.entries[i].as_ref().is_some_and(|lut| lut.matches(&curve));
            if !fresh {
                trace!(
                    "rebuilding tone LUT for stage {i} ({:?}, power {})",
                    curve.function(),
                    stage.power()
                );
                self.entries[i] = Some(ToneLut::build(curve));
                self.stale[i] = false;
                self.rebuilds += 1;
            }
        }
    }

    /// Table for `stage`, if one has been built.
    pub fn get(&self, stage: usize) -> Option<&ToneLut> {
        self.entries.get(stage)?.as_ref()
    }

    /// Force `stage` to be rebuilt by the next [`prepare`](Self::prepare).
    pub fn invalidate(&mut self, stage: usize) {
        if let Some(flag) = self.stale.get_mut(stage) {
            *flag = true;
        }
    }

    /// Force every stage to be rebuilt.
    pub fn invalidate_all(&mut self) {
        self.stale = [true; MAX_STAGES];
    }

    /// Whether `stage` would be rebuilt by the next `prepare`.
    pub fn is_stale(&self, stage: usize) -> bool {
        self.stale.get(stage).copied().unwrap_or(false) || self.get(stage).is_none()
    }

    /// Number of tables built so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}
