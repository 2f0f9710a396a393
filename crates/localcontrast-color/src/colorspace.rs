//! Color space conversion
//!
//! RGB <-> HSV in two precisions:
//!
//! - float: channels in [0.0, 1.0], hue in degrees [0.0, 360.0)
//! - integer: channels in [0, 255], hue in 1/256 sextants [0, 1536)
//!
//! The float pair feeds the float engine's saturation pass, the integer
//! pair the 8-bit fast engine's.

/// Number of integer hue steps per 60 degree sextant
pub const HUE_SEXTANT: i32 = 256;

/// Integer hue period (six sextants)
pub const HUE_PERIOD: i32 = 6 * HUE_SEXTANT;

/// HSV color with float components
///
/// - `h`: Hue in degrees, [0.0, 360.0)
/// - `s`: Saturation in [0.0, 1.0]
/// - `v`: Value in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// HSV color with integer components
///
/// - `h`: Hue in [0, 1536); 256 steps per sextant, 0 = red, 512 = green,
///   1024 = blue
/// - `s`: Saturation in [0, 255]
/// - `v`: Value in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvInt {
    pub h: i32,
    pub s: i32,
    pub v: i32,
}

/// Convert float RGB to HSV.
///
/// Gray inputs (all channels equal) get hue 0. Saturation is 0 when the
/// maximum channel is below 1e-6.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        (60.0 * (g - b) / delta + 360.0) % 360.0
    } else if max == g {
        60.0 * (b - r) / delta + 120.0
    } else {
        60.0 * (r - g) / delta + 240.0
    };

    let s = if max < 1e-6 { 0.0 } else { 1.0 - min / max };

    Hsv { h, s, v: max }
}

/// Convert float HSV to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> [f32; 3] {
    let Hsv { h, s, v } = hsv;
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match (sector as i32).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Convert 8-bit RGB to integer HSV.
pub fn rgb_to_hsv_int(r: u8, g: u8, b: u8) -> HsvInt {
    let ri = r as i32;
    let gi = g as i32;
    let bi = b as i32;

    let max = ri.max(gi).max(bi);
    let min = ri.min(gi).min(bi);
    let delta = max - min;

    if delta == 0 {
        return HsvInt { h: 0, s: 0, v: max };
    }

    let s = 255 * delta / max;
    let h = if ri == max {
        let h = HUE_SEXTANT * (gi - bi) / delta;
        if h < 0 { h + HUE_PERIOD } else { h }
    } else if gi == max {
        2 * HUE_SEXTANT + HUE_SEXTANT * (bi - ri) / delta
    } else {
        4 * HUE_SEXTANT + HUE_SEXTANT * (ri - gi) / delta
    };

    HsvInt { h, s, v: max }
}

/// Convert integer HSV to 8-bit RGB.
pub fn hsv_to_rgb_int(hsv: HsvInt) -> (u8, u8, u8) {
    let HsvInt { h, s, v } = hsv;
    let s = s.clamp(0, 255);
    let v = v.clamp(0, 255);

    if s == 0 {
        return (v as u8, v as u8, v as u8);
    }

    let h = h.rem_euclid(HUE_PERIOD);
    let sector = h / HUE_SEXTANT;
    let f = h % HUE_SEXTANT;
    let scale = 255 * HUE_SEXTANT;
    let half = scale / 2;

    let p = (v * (255 - s) + 127) / 255;
    let q = (v * (scale - s * f) + half) / scale;
    let t = (v * (scale - s * (HUE_SEXTANT - f)) + half) / scale;

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (r as u8, g as u8, b as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let red = rgb_to_hsv(1.0, 0.0, 0.0);
        assert!(close(red.h, 0.0) && close(red.s, 1.0) && close(red.v, 1.0));
        let green = rgb_to_hsv(0.0, 1.0, 0.0);
        assert!(close(green.h, 120.0));
        let blue = rgb_to_hsv(0.0, 0.0, 1.0);
        assert!(close(blue.h, 240.0));
        let magenta = rgb_to_hsv(1.0, 0.0, 1.0);
        assert!(close(magenta.h, 300.0));
    }

    #[test]
    fn test_rgb_to_hsv_gray_and_black() {
        let gray = rgb_to_hsv(0.5, 0.5, 0.5);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.v, 0.5);
        let black = rgb_to_hsv(0.0, 0.0, 0.0);
        assert_eq!(black.s, 0.0);
    }

    #[test]
    fn test_float_roundtrip() {
        let colors = [
            [0.9, 0.1, 0.2],
            [0.2, 0.7, 0.3],
            [0.1, 0.2, 0.8],
            [0.5, 0.5, 0.1],
            [0.25, 0.75, 0.75],
        ];
        for c in colors {
            let back = hsv_to_rgb(rgb_to_hsv(c[0], c[1], c[2]));
            for i in 0..3 {
                assert!(close(back[i], c[i]), "roundtrip {c:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_int_primaries() {
        assert_eq!(rgb_to_hsv_int(255, 0, 0), HsvInt { h: 0, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv_int(0, 255, 0).h, 512);
        assert_eq!(rgb_to_hsv_int(0, 0, 255).h, 1024);
        assert_eq!(rgb_to_hsv_int(128, 128, 128), HsvInt { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn test_int_roundtrip() {
        let colors = [
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 0),
            (0, 255, 255),
            (128, 64, 32),
            (200, 10, 120),
        ];
        for (r, g, b) in colors {
            let (rr, rg, rb) = hsv_to_rgb_int(rgb_to_hsv_int(r, g, b));
            assert!(
                (rr as i32 - r as i32).abs() <= 2
                    && (rg as i32 - g as i32).abs() <= 2
                    && (rb as i32 - b as i32).abs() <= 2,
                "roundtrip failed for ({r},{g},{b}): got ({rr},{rg},{rb})"
            );
        }
    }

    #[test]
    fn test_int_gray() {
        assert_eq!(hsv_to_rgb_int(HsvInt { h: 700, s: 0, v: 77 }), (77, 77, 77));
    }
}
