//! Tone curves
//!
//! A tone curve maps a sample `x1` in [0, 1] given the blurred luminance
//! `x2` of its neighborhood, also in [0, 1]. Both curves keep 0 and 1
//! fixed and are the identity when the (warped) power is 0.
//!
//! Power curve:
//!
//! ```text
//! p = 10 ^ (|2*x2 - 1| * power * 0.02)
//! x2 >= 0.5:  x1 ^ p
//! x2 <  0.5:  1 - (1 - x1) ^ p
//! ```
//!
//! Linear curve, a two-piece line through (p, 1 - p):
//!
//! ```text
//! p = 1 / (1 + exp(-(2*x2 - 1) * power * 0.04))
//! x1 <  p:  x1 * (1 - p) / p
//! x1 >= p:  (1 - p) + (x1 - p) * p / (1 - p)
//! ```

use localcontrast_core::ToneFunction;

/// A tone function bound to one stage's warped power
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    function: ToneFunction,
    power: f32,
}

impl ToneCurve {
    /// Create a curve; `warped_power` is [`StageParams::warped_power`].
    ///
    /// [`StageParams::warped_power`]: localcontrast_core::StageParams::warped_power
    pub fn new(function: ToneFunction, warped_power: f32) -> Self {
        ToneCurve {
            function,
            power: warped_power,
        }
    }

    pub fn function(&self) -> ToneFunction {
        self.function
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Evaluate the curve.
    #[inline]
    pub fn eval(&self, x1: f32, x2: f32) -> f32 {
        tone_curve(self.function, x1, x2, self.power)
    }
}

/// Evaluate `function` at sample `x1` with neighborhood luminance `x2`.
#[inline]
pub fn tone_curve(function: ToneFunction, x1: f32, x2: f32, warped_power: f32) -> f32 {
    match function {
        ToneFunction::Power => power_curve(x1, x2, warped_power),
        ToneFunction::Linear => linear_curve(x1, x2, warped_power),
    }
}

#[inline]
fn power_curve(x1: f32, x2: f32, power: f32) -> f32 {
    let p = 10f32.powf((2.0 * x2 - 1.0).abs() * power * 0.02);
    if x2 >= 0.5 {
        x1.powf(p)
    } else {
        1.0 - (1.0 - x1).powf(p)
    }
}

#[inline]
fn linear_curve(x1: f32, x2: f32, power: f32) -> f32 {
    let p = 1.0 / (1.0 + (-(2.0 * x2 - 1.0) * power * 0.04).exp());
    if x1 < p {
        x1 * (1.0 - p) / p
    } else {
        (1.0 - p) + (x1 - p) * p / (1.0 - p)
    }
}
