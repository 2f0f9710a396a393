//! Pass-level regression test
//!
//! Tests individual passes through the filter and directly:
//!   (1) a blur radius below 0.3 after zoom division does not blur
//!   (2) the stretch is the identity on a full-range histogram
//!   (3) tone curve boundary values
//!   (4) the unsharp mask increases edge contrast

use localcontrast_core::{Plane, StageParams, ToneFunction, ToneMappingParams, UnsharpMaskParams};
use localcontrast_filter::blur::{blur_plane_f32, blur_plane_fixed};
use localcontrast_filter::{LocalContrastFilter, RunControl, stretch_contrast_u8, tone_curve};
use localcontrast_test::{RegParams, images};

/// Test 1: zoom 4 turns blur 1.0 into 0.25, which is below the minimum.
#[test]
fn passes_reg_small_blur() {
    let mut rp = RegParams::new("passes_small_blur");

    let src = images::gradient_rgb(20, 20).unwrap();
    for fast in [false, true] {
        let mut zoomed = ToneMappingParams::default();
        zoomed.set_fast_mode(fast);
        zoomed.set_stage(0, StageParams::new(true, 60.0, 1.0));
        let mut tiny = zoomed.clone();
        tiny.set_stage(0, StageParams::new(true, 60.0, 0.1));

        let a = LocalContrastFilter::new(zoomed)
            .with_preview_zoom(4.0)
            .apply(&src)
            .unwrap();
        let b = LocalContrastFilter::new(tiny).apply(&src).unwrap();
        rp.compare_buffers(&a, &b);
    }

    let control = RunControl::new();
    let data: Vec<f32> = (0..36).map(|i| (i % 7) as f32 / 7.0).collect();
    let mut plane = Plane::from_data(6, 6, data.clone()).unwrap();
    blur_plane_f32(&mut plane, 0.29, &control).unwrap();
    rp.check(plane.data() == &data[..], "float plane untouched");

    let data: Vec<i32> = (0..36).map(|i| i * 7).collect();
    let mut plane = Plane::from_data(6, 6, data.clone()).unwrap();
    blur_plane_fixed(&mut plane, 0.29, &control).unwrap();
    rp.check(plane.data() == &data[..], "fixed plane untouched");

    assert!(rp.cleanup(), "passes_small_blur regression test failed");
}

/// Test 2: stretch on and off agree when the histogram spans 0..=255.
#[test]
fn passes_reg_stretch_identity() {
    let mut rp = RegParams::new("passes_stretch_identity");

    let src = images::gradient_rgb(32, 32).unwrap();
    for fast in [false, true] {
        let mut on = ToneMappingParams::default();
        on.set_fast_mode(fast);
        let mut off = on.clone();
        off.set_stretch_contrast(false);
        let a = LocalContrastFilter::new(on).apply(&src).unwrap();
        let b = LocalContrastFilter::new(off).apply(&src).unwrap();
        rp.compare_buffers(&a, &b);
    }

    let mut samples: Vec<u8> = (0..=255).chain(0..=255).collect();
    let before = samples.clone();
    let bounds = stretch_contrast_u8(&mut samples, &RunControl::new()).unwrap();
    rp.check(bounds.is_identity(), "full range bounds");
    rp.compare_strings(&before, &samples);

    assert!(rp.cleanup(), "passes_stretch_identity regression test failed");
}

/// Test 3: curve values at the ends of the sample range.
#[test]
fn passes_reg_curve_boundaries() {
    let mut rp = RegParams::new("passes_curve_boundaries");

    for function in [ToneFunction::Power, ToneFunction::Linear] {
        rp.compare_values(0.0, tone_curve(function, 0.0, 0.5, 50.0) as f64, 1e-6);
        rp.compare_values(1.0, tone_curve(function, 1.0, 0.5, 50.0) as f64, 1e-6);
        rp.compare_values(0.0, tone_curve(function, 0.0, 0.9, 100.0) as f64, 1e-6);
        rp.compare_values(1.0, tone_curve(function, 1.0, 0.1, 100.0) as f64, 1e-6);
    }
    // Power curve at x2 = 0.5 has exponent 1.
    rp.compare_values(0.3, tone_curve(ToneFunction::Power, 0.3, 0.5, 100.0) as f64, 1e-6);
    // Linear curve at x2 = 0.5 has its knee at 0.5 with unit slope.
    rp.compare_values(0.3, tone_curve(ToneFunction::Linear, 0.3, 0.5, 100.0) as f64, 1e-6);

    assert!(rp.cleanup(), "passes_curve_boundaries regression test failed");
}

/// Test 4: unsharp mask alone widens a step edge in both engines.
#[test]
fn passes_reg_unsharp_edge() {
    let mut rp = RegParams::new("passes_unsharp_edge");

    let mut data = Vec::new();
    for _y in 0..6 {
        for x in 0..24 {
            let v = if x < 12 { 70u8 } else { 170 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    let src = localcontrast_core::PixelBuffer::from_u8(24, 6, 3, data).unwrap();

    for fast in [false, true] {
        let mut params = ToneMappingParams::default();
        params.set_fast_mode(fast);
        params.set_stretch_contrast(false);
        params.stage_mut(0).unwrap().set_enabled(false);
        *params.unsharp_mask_mut() = UnsharpMaskParams::new(true, 60.0, 2.0, 0);

        let out = LocalContrastFilter::new(params).apply(&src).unwrap();
        let dark = out.get_rgb(11, 3).unwrap()[0];
        let bright = out.get_rgb(12, 3).unwrap()[0];
        eprintln!("fast={fast}: edge {dark} | {bright}");
        rp.check(dark < 70, "dark side darker");
        rp.check(bright > 170, "bright side brighter");
        // Far from the edge the correction fades out.
        rp.compare_values(70.0, out.get_rgb(0, 3).unwrap()[0] as f64, 3.0);
    }

    assert!(rp.cleanup(), "passes_unsharp_edge regression test failed");
}
