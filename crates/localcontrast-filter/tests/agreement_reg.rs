//! Engine agreement regression test
//!
//! The fixed-point and float engines implement the same pipeline. Where
//! their arithmetic agrees they must produce nearly the same image:
//!   (1) a uniform color with one stage and the stretch
//!   (2) noise with only the stretch
//!   (3) a saturation remap on a uniform color
//!   (4) gradient and noise through a real stage, per blur radius
//!
//! The engines derive their blur coefficients differently (float:
//! `exp(ln(0.25) / r)` squared over two passes; fixed: `exp(ln(0.5) / r
//! * sqrt(2))` over one pass). Under a stage the results drift apart by
//! an amount that depends on the radius and on the image structure. Test
//! 4 pins that known int/float drift so a change in either blur shows up.

use localcontrast_core::{PixelBuffer, ToneMappingParams};
use localcontrast_filter::LocalContrastFilter;
use localcontrast_test::{RegParams, images, max_sample_diff};

fn both(params: &ToneMappingParams, src: &PixelBuffer) -> (PixelBuffer, PixelBuffer) {
    let mut float = params.clone();
    float.set_fast_mode(false);
    let mut fast = params.clone();
    fast.set_fast_mode(true);
    (
        LocalContrastFilter::new(float).apply(src).unwrap(),
        LocalContrastFilter::new(fast).apply(src).unwrap(),
    )
}

/// Test 1: uniform (200, 100, 50) with the default stage and stretch.
#[test]
fn agreement_reg_uniform_color() {
    let mut rp = RegParams::new("agreement_uniform");

    let src = images::uniform_rgb(8, 8, [200, 100, 50]).unwrap();
    let (float, fast) = both(&ToneMappingParams::default(), &src);
    eprintln!("float {:?}, fast {:?}", float.get_rgb(0, 0), fast.get_rgb(0, 0));
    rp.compare_buffers_within(&float, &fast, 2);
    rp.compare_values(255.0, fast.get_rgb(3, 3).unwrap()[0] as f64, 0.0);
    rp.compare_values(0.0, fast.get_rgb(3, 3).unwrap()[2] as f64, 0.0);

    assert!(rp.cleanup(), "agreement_uniform regression test failed");
}

/// Test 2: stretch only on noise.
#[test]
fn agreement_reg_stretch_only() {
    let mut rp = RegParams::new("agreement_stretch");

    let mut params = ToneMappingParams::default();
    params.stage_mut(0).unwrap().set_enabled(false);

    let noise = images::noise_rgb(16, 16, 3).unwrap();
    let (float, fast) = both(&params, &noise);
    rp.compare_buffers_within(&float, &fast, 2);

    // A narrow band that the stretch widens.
    let band = images::checkerboard(6, 6, [90, 100, 110], [140, 150, 160]).unwrap();
    let (float, fast) = both(&params, &band);
    rp.compare_buffers_within(&float, &fast, 2);
    rp.compare_values(0.0, fast.get_rgb(0, 0).unwrap()[0] as f64, 0.0);
    rp.compare_values(255.0, fast.get_rgb(1, 0).unwrap()[2] as f64, 0.0);

    assert!(rp.cleanup(), "agreement_stretch regression test failed");
}

/// Test 3: a saturation remap without stages.
#[test]
fn agreement_reg_saturation() {
    let mut rp = RegParams::new("agreement_saturation");

    let mut params = ToneMappingParams::default();
    params.stage_mut(0).unwrap().set_enabled(false);
    params.set_stretch_contrast(false);
    params.set_high_saturation(40);
    params.set_low_saturation(40);

    let src = images::uniform_rgb(4, 4, [180, 90, 60]).unwrap();
    let (float, fast) = both(&params, &src);
    let diff = max_sample_diff(&float, &fast).unwrap();
    eprintln!("saturation remap engine difference: {diff}");
    rp.compare_buffers_within(&float, &fast, 3);

    assert!(rp.cleanup(), "agreement_saturation regression test failed");
}

/// Known int/float drift under one stage, as (blur radius, max difference).
const GRADIENT_DRIFT: [(f32, u32); 4] = [(1.0, 3), (4.0, 6), (20.0, 18), (80.0, 25)];
const NOISE_DRIFT: [(f32, u32); 4] = [(1.0, 28), (4.0, 9), (20.0, 5), (80.0, 5)];

fn stage_drift(src: &PixelBuffer, blur: f32) -> u32 {
    let mut params = ToneMappingParams::default();
    params.stage_mut(0).unwrap().set_blur(blur);
    let (float, fast) = both(&params, src);
    max_sample_diff(&float, &fast).unwrap()
}

/// Test 4: the default stage on structured images, per blur radius.
#[test]
fn agreement_reg_stage_drift() {
    let mut rp = RegParams::new("agreement_stage_drift");

    let gradient = images::gradient_rgb(64, 48).unwrap();
    let mut drifts = Vec::new();
    for (blur, bound) in GRADIENT_DRIFT {
        let diff = stage_drift(&gradient, blur);
        eprintln!("gradient, blur {blur}: int/float drift {diff}");
        rp.check(diff <= bound, &format!("gradient drift at blur {blur} is {diff} > {bound}"));
        drifts.push(diff);
    }
    // On smooth ramps the drift grows with the radius.
    rp.check(drifts[0] <= drifts[3], "gradient drift grows with radius");

    let noise = images::noise_rgb(64, 48, 7).unwrap();
    for (blur, bound) in NOISE_DRIFT {
        let diff = stage_drift(&noise, blur);
        eprintln!("noise, blur {blur}: int/float drift {diff}");
        rp.check(diff <= bound, &format!("noise drift at blur {blur} is {diff} > {bound}"));
    }

    assert!(rp.cleanup(), "agreement_stage_drift regression test failed");
}
