//! Tone mapping parameters
//!
//! [`ToneMappingParams`] is a plain value describing one local contrast run:
//! up to [`MAX_STAGES`] tone mapping stages, saturation limits, the contrast
//! stretch flag, the tone function and the unsharp mask sub-parameters.
//!
//! Every numeric setter clamps its input into the documented range. Out of
//! range values (including NaN, which maps to the lower bound) are never
//! rejected.
//!
//! See [`serial`] for the text format and [`action`] for the key/value form.
//!
//! # Examples
//!
//! ```
//! use localcontrast_core::ToneMappingParams;
//!
//! let mut params = ToneMappingParams::default();
//! params.stage_mut(1).unwrap().set_power(150.0);
//! assert_eq!(params.stage(1).unwrap().power(), 100.0);
//! ```

pub mod action;
pub mod serial;

/// Number of tone mapping stages
pub const MAX_STAGES: usize = 4;

/// Upper bound of a stage's power
pub const MAX_POWER: f32 = 100.0;
/// Upper bound of a stage's blur radius
pub const MAX_STAGE_BLUR: f32 = 10_000.0;
/// Upper bound of the unsharp mask blur radius
pub const MAX_UNSHARP_BLUR: f32 = 5_000.0;
/// Upper bound of saturation and threshold percentages
pub const MAX_PERCENT: u32 = 100;

/// Clamp a float into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
fn clamp_f32(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

#[inline]
fn clamp_percent(value: i32) -> u32 {
    value.clamp(0, MAX_PERCENT as i32) as u32
}

/// Transfer function used by every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ToneFunction {
    /// Power-law curve; the exponent grows with the distance of the local
    /// luminance from mid-gray.
    #[default]
    Power = 0,
    /// Piecewise-linear curve pivoting at a logistic function of the local
    /// luminance.
    Linear = 1,
}

impl ToneFunction {
    /// Map a raw function id to a function, clamping to the valid ids.
    pub fn from_id(id: i32) -> Self {
        if id <= 0 {
            ToneFunction::Power
        } else {
            ToneFunction::Linear
        }
    }

    /// Raw function id (0 or 1).
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Parameters of one tone mapping stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageParams {
    enabled: bool,
    power: f32,
    blur: f32,
}

impl StageParams {
    /// Create stage parameters, clamping power to [0, 100] and blur to
    /// [0, 10000].
    pub fn new(enabled: bool, power: f32, blur: f32) -> Self {
        let mut stage = StageParams {
            enabled,
            power: 0.0,
            blur: 0.0,
        };
        stage.set_power(power);
        stage.set_blur(blur);
        stage
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Raw power as set by the caller, in [0, 100].
    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn set_power(&mut self, power: f32) {
        self.power = clamp_f32(power, 0.0, MAX_POWER);
    }

    /// Blur radius in image pixels, in [0, 10000].
    pub fn blur(&self) -> f32 {
        self.blur
    }

    pub fn set_blur(&mut self, blur: f32) {
        self.blur = clamp_f32(blur, 0.0, MAX_STAGE_BLUR);
    }

    /// Perceptually warped power fed to the tone curve:
    /// `(power / 100)^1.5 * 100`.
    pub fn warped_power(&self) -> f32 {
        (self.power / 100.0).powf(1.5) * 100.0
    }
}

impl Default for StageParams {
    fn default() -> Self {
        StageParams::new(false, 30.0, 80.0)
    }
}

/// Unsharp mask post-pass parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsharpMaskParams {
    enabled: bool,
    power: f32,
    blur: f32,
    threshold: u32,
}

impl UnsharpMaskParams {
    /// Create unsharp mask parameters, clamping every value into range.
    pub fn new(enabled: bool, power: f32, blur: f32, threshold: i32) -> Self {
        let mut usm = UnsharpMaskParams {
            enabled,
            power: 0.0,
            blur: 0.0,
            threshold: 0,
        };
        usm.set_power(power);
        usm.set_blur(blur);
        usm.set_threshold(threshold);
        usm
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Raw power in [0, 100].
    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn set_power(&mut self, power: f32) {
        self.power = clamp_f32(power, 0.0, MAX_POWER);
    }

    /// Blur radius in image pixels, in [0, 5000].
    pub fn blur(&self) -> f32 {
        self.blur
    }

    pub fn set_blur(&mut self, blur: f32) {
        self.blur = clamp_f32(blur, 0.0, MAX_UNSHARP_BLUR);
    }

    /// Noise gate threshold in [0, 100].
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: i32) {
        self.threshold = clamp_percent(threshold);
    }

    /// Cubic warp of the power: `(power / 100)^3 * 10`.
    pub fn warped_power(&self) -> f32 {
        (self.power / 100.0).powi(3) * 10.0
    }
}

impl Default for UnsharpMaskParams {
    fn default() -> Self {
        UnsharpMaskParams::new(false, 30.0, 4.0, 0)
    }
}

/// Complete parameter set of a local contrast run
#[derive(Debug, Clone, PartialEq)]
pub struct ToneMappingParams {
    stages: [StageParams; MAX_STAGES],
    low_saturation: u32,
    high_saturation: u32,
    stretch_contrast: bool,
    function: ToneFunction,
    unsharp_mask: UnsharpMaskParams,
    fast_mode: bool,
}

impl Default for ToneMappingParams {
    /// Stage 0 enabled with power 30 and blur 80, the others disabled;
    /// saturation untouched, contrast stretch on, power function, float
    /// engine, unsharp mask off.
    fn default() -> Self {
        let mut stages = [StageParams::default(); MAX_STAGES];
        stages[0].set_enabled(true);
        ToneMappingParams {
            stages,
            low_saturation: MAX_PERCENT,
            high_saturation: MAX_PERCENT,
            stretch_contrast: true,
            function: ToneFunction::Power,
            unsharp_mask: UnsharpMaskParams::default(),
            fast_mode: false,
        }
    }
}

impl ToneMappingParams {
    /// Create the default parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stages in execution order.
    pub fn stages(&self) -> &[StageParams; MAX_STAGES] {
        &self.stages
    }

    /// Parameters of stage `index`, or `None` if `index >= MAX_STAGES`.
    pub fn stage(&self, index: usize) -> Option<&StageParams> {
        self.stages.get(index)
    }

    /// Mutable parameters of stage `index`.
    pub fn stage_mut(&mut self, index: usize) -> Option<&mut StageParams> {
        self.stages.get_mut(index)
    }

    /// Replace a whole stage. Indices past the last stage are ignored.
    pub fn set_stage(&mut self, index: usize, stage: StageParams) {
        if let Some(slot) = self.stages.get_mut(index) {
            *slot = stage;
        }
    }

    /// Whether any stage is enabled.
    pub fn any_stage_enabled(&self) -> bool {
        self.stages.iter().any(StageParams::enabled)
    }

    /// Shadow saturation in [0, 100]; 100 leaves saturation unchanged.
    pub fn low_saturation(&self) -> u32 {
        self.low_saturation
    }

    pub fn set_low_saturation(&mut self, value: i32) {
        self.low_saturation = clamp_percent(value);
    }

    /// Highlight saturation in [0, 100]; 100 leaves saturation unchanged.
    pub fn high_saturation(&self) -> u32 {
        self.high_saturation
    }

    pub fn set_high_saturation(&mut self, value: i32) {
        self.high_saturation = clamp_percent(value);
    }

    /// Whether the saturation remap pass runs.
    pub fn remaps_saturation(&self) -> bool {
        self.low_saturation != MAX_PERCENT || self.high_saturation != MAX_PERCENT
    }

    pub fn stretch_contrast(&self) -> bool {
        self.stretch_contrast
    }

    pub fn set_stretch_contrast(&mut self, enabled: bool) {
        self.stretch_contrast = enabled;
    }

    pub fn function(&self) -> ToneFunction {
        self.function
    }

    pub fn set_function(&mut self, function: ToneFunction) {
        self.function = function;
    }

    /// Set the function from its raw id, clamping to {0, 1}.
    pub fn set_function_id(&mut self, id: i32) {
        self.function = ToneFunction::from_id(id);
    }

    pub fn unsharp_mask(&self) -> &UnsharpMaskParams {
        &self.unsharp_mask
    }

    pub fn unsharp_mask_mut(&mut self) -> &mut UnsharpMaskParams {
        &mut self.unsharp_mask
    }

    /// `true` selects the 8-bit lookup table engine, `false` the float engine.
    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn set_fast_mode(&mut self, fast: bool) {
        self.fast_mode = fast;
    }
}
