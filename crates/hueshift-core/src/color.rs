//! RGB <-> HSL conversion kernel.
//!
//! This is the reference definition of the color math. The WGSL shader in
//! `hueshift-compute` mirrors it operation for operation, and the parity tests
//! in `hueshift-tests` compare the two.
//!
//! # Conversion
//!
//! Channels are normalized to `[0, 1]`, then with `cmin`, `cmax` and
//! `delta = cmax - cmin`:
//!
//! ```text
//! delta == 0  ->  hue = 0
//! cmax == r   ->  hue = 60 * (((g - b) / delta) mod 6)
//! cmax == g   ->  hue = 60 * ((b - r) / delta + 2)
//! otherwise   ->  hue = 60 * ((r - g) / delta + 4)
//!
//! l = (cmax + cmin) / 2
//! s = delta / (1 - |2l - 1|)        (0 when delta == 0)
//! ```
//!
//! [`rgb_to_hsl`] rounds the hue to whole degrees and saturation/lightness
//! to one decimal of a percent. Ties round toward positive infinity
//! ([`round_half_up`]), never to even.
//!
//! # Round trip
//!
//! [`Hsl::from_rgb_exact`] skips the rounding, and
//! `hsl_to_rgb(Hsl::from_rgb_exact(c)) == c` for every 8-bit color. With the
//! rounded conversion the whole-degree hue costs up to 2 units per channel at
//! full chroma.

use std::fmt;

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// ```
/// use hueshift_core::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// ```
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[inline]
fn round_tenth(v: f64) -> f64 {
    round_half_up(v * 10.0) / 10.0
}

#[inline]
fn to_channel(v: f64) -> u8 {
    round_half_up(v * 255.0).clamp(0.0, 255.0) as u8
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reads the first three bytes of a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `px` has fewer than three elements.
    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Writes the channels into the first three bytes of a pixel.
    #[inline]
    pub fn write_to(self, px: &mut [u8]) {
        px[0] = self.r;
        px[1] = self.g;
        px[2] = self.b;
    }

    /// Channels as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `#rrggbb` hex notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// True when all channels are equal (no hue).
    #[inline]
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// HSL color: hue in degrees `[0, 360)`, saturation and lightness in
/// percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f64,
    /// Saturation in percent
    pub s: f64,
    /// Lightness in percent
    pub l: f64,
}

impl Hsl {
    /// Creates a color from its components.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Unrounded conversion from RGB.
    ///
    /// Same formulas as [`rgb_to_hsl`] without quantizing the result.
    pub fn from_rgb_exact(rgb: Rgb) -> Self {
        let (hue, s, l) = decompose(rgb);
        let h = if hue < 0.0 { hue + 360.0 } else { hue };
        Self::new(h, s * 100.0, l * 100.0)
    }

    /// Same saturation and lightness with a different hue.
    #[inline]
    pub const fn with_hue(self, h: f64) -> Self {
        Self { h, ..self }
    }

    /// True when the color carries no hue.
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Raw hue in degrees (may be negative), saturation and lightness in `[0, 1]`.
#[inline]
fn decompose(rgb: Rgb) -> (f64, f64, f64) {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let cmin = r.min(g).min(b);
    let cmax = r.max(g).max(b);
    let delta = cmax - cmin;

    let sector = if delta == 0.0 {
        0.0
    } else if cmax == r {
        ((g - b) / delta) % 6.0
    } else if cmax == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let l = (cmax + cmin) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    (sector * 60.0, s, l)
}

/// Converts RGB to HSL.
///
/// Hue is rounded to whole degrees, saturation and lightness to one decimal.
///
/// ```
/// use hueshift_core::{rgb_to_hsl, Hsl, Rgb};
///
/// assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), Hsl::new(120.0, 100.0, 50.0));
/// assert_eq!(rgb_to_hsl(Rgb::new(128, 128, 128)), Hsl::new(0.0, 0.0, 50.2));
/// ```
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (hue, s, l) = decompose(rgb);

    let mut h = round_half_up(hue);
    if h < 0.0 {
        h += 360.0;
    }

    Hsl::new(h, round_tenth(s * 100.0), round_tenth(l * 100.0))
}

/// Converts HSL back to RGB.
///
/// The hue is wrapped into `[0, 360)` first, so 360 behaves like 0. Each
/// channel is rounded half up and clamped to `[0, 255]`.
///
/// ```
/// use hueshift_core::{hsl_to_rgb, Hsl, Rgb};
///
/// assert_eq!(hsl_to_rgb(Hsl::new(60.0, 100.0, 50.0)), Rgb::new(255, 255, 0));
/// // no saturation: hue is irrelevant
/// assert!(hsl_to_rgb(Hsl::new(123.0, 0.0, 40.0)).is_gray());
/// ```
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = crate::arc::normalize_degrees(hsl.h);
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn max_channel_error(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_hsl(Rgb::new(255, 0, 0)), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 255)), Hsl::new(240.0, 100.0, 50.0));
    }

    #[test]
    fn secondary_and_mixed_colors() {
        assert_eq!(rgb_to_hsl(Rgb::new(255, 128, 0)), Hsl::new(30.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(12, 200, 99)), Hsl::new(148.0, 88.7, 41.6));
        assert_eq!(rgb_to_hsl(Rgb::new(200, 30, 180)), Hsl::new(307.0, 73.9, 45.1));
        assert_eq!(rgb_to_hsl(Rgb::new(10, 20, 30)), Hsl::new(210.0, 50.0, 7.8));
    }

    #[test]
    fn red_max_with_blue_above_green_wraps_to_positive() {
        // (g - b) / delta is negative here; the hue must come out near 360
        let hsl = rgb_to_hsl(Rgb::new(255, 0, 10));
        assert!(hsl.h > 350.0 && hsl.h < 360.0, "hue {}", hsl.h);
    }

    #[test]
    fn achromatic_has_no_saturation() {
        for v in [0u8, 1, 64, 127, 128, 200, 254, 255] {
            let hsl = rgb_to_hsl(Rgb::new(v, v, v));
            assert_eq!(hsl.h, 0.0);
            assert_eq!(hsl.s, 0.0);
            let expected = round_half_up(f64::from(v) / 255.0 * 100.0 * 10.0) / 10.0;
            assert_relative_eq!(hsl.l, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_saturation_ignores_hue() {
        for h in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            for l in [0.0, 12.5, 50.0, 87.3, 100.0] {
                assert!(hsl_to_rgb(Hsl::new(h, 0.0, l)).is_gray(), "h={h} l={l}");
            }
        }
    }

    #[test]
    fn hue_360_behaves_like_zero() {
        assert_eq!(
            hsl_to_rgb(Hsl::new(360.0, 100.0, 50.0)),
            hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0))
        );
    }

    #[test]
    fn sector_boundaries() {
        assert_eq!(hsl_to_rgb(Hsl::new(60.0, 100.0, 50.0)), Rgb::new(255, 255, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(180.0, 100.0, 50.0)), Rgb::new(0, 255, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(300.0, 100.0, 50.0)), Rgb::new(255, 0, 255));
    }

    #[test]
    fn exact_round_trip_is_lossless() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    let c = Rgb::new(r, g, b);
                    assert_eq!(hsl_to_rgb(Hsl::from_rgb_exact(c)), c);
                }
            }
        }
    }

    #[test]
    fn rounded_round_trip_stays_within_two() {
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(3) {
                    let c = Rgb::new(r, g, b);
                    let back = hsl_to_rgb(rgb_to_hsl(c));
                    assert!(max_channel_error(c, back) <= 2, "{c} -> {back}");
                }
            }
        }
    }

    #[test]
    fn rounded_hue_quantization_is_the_only_large_error() {
        // raw hue 238.42 rounds to 238; at full chroma that moves green by 2
        let c = Rgb::new(0, 6, 228);
        assert_eq!(hsl_to_rgb(rgb_to_hsl(c)), Rgb::new(0, 8, 228));
    }

    #[test]
    fn hue_range() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let hsl = rgb_to_hsl(Rgb::new(r, g, b));
                    assert!((0.0..360.0).contains(&hsl.h));
                    assert!((0.0..=100.0).contains(&hsl.s));
                    assert!((0.0..=100.0).contains(&hsl.l));
                }
            }
        }
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }
}
