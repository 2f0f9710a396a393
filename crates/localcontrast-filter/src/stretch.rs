//! Contrast stretch
//!
//! Linearly remaps all R, G and B samples so that the darkest and
//! brightest 0.1% of the 256-bucket histogram are clipped and the rest
//! spans the full range. A histogram whose trimmed bounds collapse
//! (`min >= max`) falls back to the full range 0..=255, which makes the
//! stretch the identity.

use crate::control::{RunControl, RunResult};
use log::debug;

/// Number of histogram buckets
const BUCKETS: usize = 256;

/// Fraction of samples clipped at each end, as a divisor of the count
const CLIP_DIVISOR: usize = 1000;

/// Histogram bounds of a stretch, as bucket indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchBounds {
    pub min: u8,
    pub max: u8,
}

impl StretchBounds {
    /// Whether the stretch maps every sample to itself.
    pub fn is_identity(&self) -> bool {
        self.min == 0 && self.max == 255
    }
}

/// Find the clipped bounds of a 256-bucket histogram over `count` samples.
pub fn histogram_bounds(histogram: &[usize; BUCKETS], count: usize) -> StretchBounds {
    let desired = count / CLIP_DIVISOR;

    let min = first_above(histogram.iter(), desired);
    let max = first_above(histogram.iter().rev(), desired).map(|i| BUCKETS - 1 - i);

    match (min, max) {
        (Some(min), Some(max)) if min < max => StretchBounds {
            min: min as u8,
            max: max as u8,
        },
        _ => {
            debug!("contrast stretch bounds collapsed, using full range");
            StretchBounds { min: 0, max: 255 }
        }
    }
}

/// Index of the first bucket at which the running sum exceeds `desired`.
fn first_above<'a>(buckets: impl Iterator<Item = &'a usize>, desired: usize) -> Option<usize> {
    let mut sum = 0;
    for (i, &n) in buckets.enumerate() {
        sum += n;
        if sum > desired {
            return Some(i);
        }
    }
    None
}

/// Stretch float samples in [0, 1] in place.
pub fn stretch_contrast_f32(samples: &mut [f32], control: &RunControl<'_>) -> RunResult<StretchBounds> {
    let mut histogram = [0usize; BUCKETS];
    for &v in samples.iter() {
        histogram[((v * 255.0) as i32).clamp(0, 255) as usize] += 1;
    }
    control.check()?;

    let bounds = histogram_bounds(&histogram, samples.len());
    if bounds.is_identity() {
        return Ok(bounds);
    }

    let min = bounds.min as f32 / 255.0;
    let max = bounds.max as f32 / 255.0;
    let scale = 1.0 / (max - min);
    for v in samples.iter_mut() {
        *v = ((*v - min) * scale).clamp(0.0, 1.0);
    }
    Ok(bounds)
}

/// Stretch 8-bit samples in place, rounding to nearest.
pub fn stretch_contrast_u8(samples: &mut [u8], control: &RunControl<'_>) -> RunResult<StretchBounds> {
    let mut histogram = [0usize; BUCKETS];
    for &v in samples.iter() {
        histogram[v as usize] += 1;
    }
    control.check()?;

    let bounds = histogram_bounds(&histogram, samples.len());
    if bounds.is_identity() {
        return Ok(bounds);
    }

    let min = bounds.min as i32;
    let range = bounds.max as i32 - min;
    let lut: [u8; BUCKETS] = std::array::from_fn(|x| {
        (((x as i32 - min) * 255 + range / 2) / range).clamp(0, 255) as u8
    });
    for v in samples.iter_mut() {
        *v = lut[*v as usize];
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clip_tails() {
        let mut hist = [0usize; 256];
        hist[10] = 1; // outlier within the 0.1% tail
        hist[40] = 999;
        hist[200] = 999;
        hist[250] = 1;
        let bounds = histogram_bounds(&hist, 2000);
        assert_eq!(bounds, StretchBounds { min: 40, max: 200 });
    }

    #[test]
    fn test_bounds_collapse_fallback() {
        let mut hist = [0usize; 256];
        hist[128] = 48;
        assert!(histogram_bounds(&hist, 48).is_identity());
        assert!(histogram_bounds(&[0; 256], 0).is_identity());
    }

    #[test]
    fn test_full_range_is_identity() {
        let control = RunControl::new();
        let mut samples: Vec<u8> = (0..=255).collect();
        let before = samples.clone();
        let bounds = stretch_contrast_u8(&mut samples, &control).unwrap();
        assert!(bounds.is_identity());
        assert_eq!(samples, before);

        let mut floats: Vec<f32> = (0..=255).map(|v| v as f32 / 255.0).collect();
        let before = floats.clone();
        stretch_contrast_f32(&mut floats, &control).unwrap();
        assert_eq!(floats, before);
    }

    #[test]
    fn test_stretch_u8() {
        let control = RunControl::new();
        let mut samples = vec![50u8, 100, 200, 50, 100, 200];
        stretch_contrast_u8(&mut samples, &control).unwrap();
        assert_eq!(samples, vec![0, 85, 255, 0, 85, 255]);
    }

    #[test]
    fn test_stretch_f32() {
        let control = RunControl::new();
        let mut samples = vec![50.5 / 255.0, 100.5 / 255.0, 200.5 / 255.0, 0.9];
        let bounds = stretch_contrast_f32(&mut samples, &control).unwrap();
        assert_eq!(bounds, StretchBounds { min: 50, max: 229 });
        assert!((samples[0] - 0.5 / 179.0).abs() < 1e-5);
        // 0.9 lies above the top bucket's lower edge and clips to white.
        assert_eq!(samples[3], 1.0);
        assert!(samples.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
