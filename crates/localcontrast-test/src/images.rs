//! Synthetic test images
//!
//! All generators produce interleaved 8-bit RGB buffers without alpha.

use crate::error::TestResult;
use localcontrast_core::PixelBuffer;
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;

/// Every pixel set to `rgb`.
pub fn uniform_rgb(width: u32, height: u32, rgb: [u8; 3]) -> TestResult<PixelBuffer> {
    let data = (0..width as usize * height as usize)
        .flat_map(|_| rgb)
        .collect();
    Ok(PixelBuffer::from_u8(width, height, 3, data)?)
}

/// Alternating `even` and `odd` pixels; `(0, 0)` is `even`.
pub fn checkerboard(width: u32, height: u32, even: [u8; 3], odd: [u8; 3]) -> TestResult<PixelBuffer> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(if (x + y) % 2 == 0 { &even } else { &odd });
        }
    }
    Ok(PixelBuffer::from_u8(width, height, 3, data)?)
}

/// Red ramps left to right, green top to bottom, blue is their mean.
pub fn gradient_rgb(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let ramp = |i: u32, n: u32| {
        if n <= 1 { 0 } else { (i * 255 / (n - 1)) as u8 }
    };
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ramp(x, width);
            let g = ramp(y, height);
            data.extend_from_slice(&[r, g, ((r as u16 + g as u16) / 2) as u8]);
        }
    }
    Ok(PixelBuffer::from_u8(width, height, 3, data)?)
}

/// Uniform random samples from a seeded generator.
pub fn noise_rgb(width: u32, height: u32, seed: u64) -> TestResult<PixelBuffer> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width as usize * height as usize * 3)
        .map(|_| {
            let v: u8 = StandardUniform.sample(&mut rng);
            v
        })
        .collect();
    Ok(PixelBuffer::from_u8(width, height, 3, data)?)
}

/// Widen an 8-bit buffer to 16 bits (`v * 257`), keeping alpha.
pub fn widen_to_16(buf: &PixelBuffer) -> TestResult<PixelBuffer> {
    let Some(samples) = buf.as_u8() else {
        return Ok(buf.clone());
    };
    let data = samples.iter().map(|&v| v as u16 * 257).collect();
    Ok(PixelBuffer::from_u16(buf.width(), buf.height(), buf.channels(), data)?)
}

/// Append an alpha channel computed from each pixel's position.
pub fn with_alpha(buf: &PixelBuffer) -> TestResult<PixelBuffer> {
    let Some(samples) = buf.as_u8().filter(|_| !buf.has_alpha()) else {
        return Ok(buf.clone());
    };
    let data = samples
        .chunks_exact(3)
        .enumerate()
        .flat_map(|(i, px)| [px[0], px[1], px[2], (i * 37 % 256) as u8])
        .collect();
    Ok(PixelBuffer::from_u8(buf.width(), buf.height(), 4, data)?)
}
