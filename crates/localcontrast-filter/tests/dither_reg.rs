//! Dithering regression test
//!
//! The float engine adds one uniform offset in [0, 1) per pixel before
//! truncating, so a constant value with fractional part f comes out as
//! floor + 1 with frequency close to f.

use localcontrast_core::RgbBuffer;
use localcontrast_filter::{FloatToneMapper, RunControl};
use localcontrast_test::RegParams;

fn frequency_of_upper(fraction: f32, seed: u64) -> (f64, bool) {
    let (w, h) = (100u32, 100u32);
    let value = (100.0 + fraction) / 255.0;
    let image = RgbBuffer::from_data(w, h, vec![value; (w * h * 3) as usize]).unwrap();
    let mut out = RgbBuffer::<u8>::new(w, h).unwrap();
    FloatToneMapper::new(seed)
        .quantize(&image, &mut out, &RunControl::new())
        .unwrap();

    let only_neighbors = out.data().iter().all(|&v| v == 100 || v == 101);
    let upper = out.pixels().filter(|px| px[0] == 101).count();
    (upper as f64 / (w * h) as f64, only_neighbors)
}

#[test]
fn dither_reg_distribution() {
    let mut rp = RegParams::new("dither_distribution");

    for (fraction, seed) in [(0.3f32, 1u64), (0.5, 2), (0.8, 3)] {
        let (freq, only_neighbors) = frequency_of_upper(fraction, seed);
        eprintln!("fraction {fraction}: upper frequency {freq:.4}");
        rp.check(only_neighbors, "outputs are floor or floor + 1");
        rp.compare_values(fraction as f64, freq, 0.03);
    }

    assert!(rp.cleanup(), "dither_distribution regression test failed");
}

#[test]
fn dither_reg_16_bit() {
    let mut rp = RegParams::new("dither_16bit");

    let image = RgbBuffer::from_data(50, 50, vec![0.25f32; 7500]).unwrap();
    let mut out = RgbBuffer::<u16>::new(50, 50).unwrap();
    FloatToneMapper::new(9)
        .quantize(&image, &mut out, &RunControl::new())
        .unwrap();
    // 0.25 * 65535 = 16383.75
    let ok = out.data().iter().all(|&v| v == 16383 || v == 16384);
    rp.check(ok, "16-bit outputs are floor or floor + 1");
    let upper = out.data().iter().filter(|&&v| v == 16384).count() as f64 / 7500.0;
    rp.compare_values(0.75, upper, 0.05);

    assert!(rp.cleanup(), "dither_16bit regression test failed");
}
