//! Parameter model regression test
//!
//! Tests ToneMappingParams:
//!   (1) setters clamp to their documented ranges
//!   (2) the text format survives a write/read cycle through a file
//!   (3) the key/value form survives a round trip and reads leniently

use localcontrast_core::{StageParams, ToneFunction, ToneMappingParams, UnsharpMaskParams};
use localcontrast_test::RegParams;

#[test]
fn params_reg_clamping() {
    let mut rp = RegParams::new("params_clamping");

    let stage = StageParams::new(true, 250.0, -4.0);
    rp.compare_values(100.0, stage.power() as f64, 0.0);
    rp.compare_values(0.0, stage.blur() as f64, 0.0);
    let stage = StageParams::new(true, f32::NAN, 1e9);
    rp.compare_values(0.0, stage.power() as f64, 0.0);
    rp.compare_values(10_000.0, stage.blur() as f64, 0.0);

    let usm = UnsharpMaskParams::new(true, -1.0, 9_000.0, -7);
    rp.compare_values(0.0, usm.power() as f64, 0.0);
    rp.compare_values(5_000.0, usm.blur() as f64, 0.0);
    rp.compare_values(0.0, usm.threshold() as f64, 0.0);

    let mut params = ToneMappingParams::default();
    params.set_low_saturation(-20);
    params.set_high_saturation(180);
    rp.compare_values(0.0, params.low_saturation() as f64, 0.0);
    rp.compare_values(100.0, params.high_saturation() as f64, 0.0);
    params.set_function_id(7);
    rp.check(params.function() == ToneFunction::Linear, "out of range id clamps to linear");
    params.set_function_id(-3);
    rp.check(params.function() == ToneFunction::Power, "negative id clamps to power");

    // Warped power: (30 / 100)^1.5 * 100
    let warped = StageParams::new(true, 30.0, 80.0).warped_power();
    rp.compare_values(16.431_677, warped as f64, 1e-4);

    assert!(rp.cleanup(), "params_clamping regression test failed");
}

#[test]
fn params_reg_file_roundtrip() {
    let mut rp = RegParams::new("params_file");

    let mut params = ToneMappingParams::default();
    params.set_stage(1, StageParams::new(true, 55.5, 12.0));
    params.set_stage(3, StageParams::new(true, 5.0, 2_500.0));
    params.set_low_saturation(35);
    params.set_function(ToneFunction::Linear);
    *params.unsharp_mask_mut() = UnsharpMaskParams::new(true, 40.0, 2.5, 12);

    let path = std::env::temp_dir().join(format!("params_reg_{}.txt", std::process::id()));
    params.write_to_file(&path).unwrap();
    let back = ToneMappingParams::read_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    rp.check(back == params, "file round trip");

    let bytes = params.write_to_bytes().unwrap();
    let again = ToneMappingParams::read_from_bytes(&bytes).unwrap().write_to_bytes().unwrap();
    rp.compare_strings(&bytes, &again);

    let mut reader = &bytes[..];
    let read = ToneMappingParams::read_from_reader(&mut reader).unwrap();
    rp.check(read == params, "reader round trip");

    assert!(rp.cleanup(), "params_file regression test failed");
}

#[test]
fn params_reg_action_values() {
    let mut rp = RegParams::new("params_action");

    let mut params = ToneMappingParams::default();
    params.set_fast_mode(true);
    params.set_stage(2, StageParams::new(true, 70.0, 300.0));
    params.set_high_saturation(60);
    let pairs = params.to_action_params();
    rp.check(
        pairs.iter().any(|(k, v)| k == "stage[2]:power" && v == "70"),
        "stage key present",
    );
    rp.check(ToneMappingParams::from_action_params(&pairs) == params, "round trip");

    let partial = [("highSaturation", "250"), ("functionId", "1"), ("bogus", "x")];
    let read = ToneMappingParams::from_action_params(&partial);
    rp.compare_values(100.0, read.high_saturation() as f64, 0.0);
    rp.check(read.function() == ToneFunction::Linear, "function id read");
    rp.check(read.stage(0).is_some_and(|s| s.enabled()), "defaults kept");

    assert!(rp.cleanup(), "params_action regression test failed");
}
