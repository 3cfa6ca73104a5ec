//! Hue remapping: configuration and the scalar CPU pass.
//!
//! A [`HueRemap`] selects every pixel whose hue lies on an input [`HueArc`]
//! and replaces that hue with a single output angle, keeping saturation and
//! lightness. Pixels outside the arc are left byte-identical, and alpha is
//! never touched.
//!
//! # Usage
//!
//! ```rust
//! use hueshift_core::{remap, HueRemap, RasterImage};
//!
//! let src = RasterImage::filled(4, 4, [0, 0, 255, 255]).unwrap();
//! let out = remap(&src, &HueRemap::default());
//! assert_eq!(out.pixel(0, 0).unwrap(), [255, 255, 0, 255]);
//! // the source is never modified
//! assert_eq!(src.pixel(0, 0).unwrap(), [0, 0, 255, 255]);
//! ```

use crate::arc::normalize_degrees;
use crate::{hsl_to_rgb, rgb_to_hsl, Error, HueArc, RasterImage, Result, Rgb};

/// Immutable remap configuration: input arc plus output hue.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RemapAngles"))]
pub struct HueRemap {
    /// Hues selected for replacement
    pub arc: HueArc,
    /// Replacement hue in degrees
    pub output: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RemapAngles {
    arc: HueArc,
    output: f64,
}

#[cfg(feature = "serde")]
impl From<RemapAngles> for HueRemap {
    fn from(r: RemapAngles) -> Self {
        Self { arc: r.arc, output: normalize_degrees(r.output) }
    }
}

impl Default for HueRemap {
    fn default() -> Self {
        Self {
            arc: HueArc::default(),
            output: 60.0,
        }
    }
}

impl HueRemap {
    /// Creates a configuration. All angles are wrapped into `[0, 360)`.
    pub fn new(start: f64, end: f64, output: f64) -> Self {
        Self {
            arc: HueArc::new(start, end),
            output: normalize_degrees(output),
        }
    }

    /// Copy with a different arc start.
    pub fn with_start(self, start: f64) -> Self {
        Self { arc: self.arc.with_start(start), ..self }
    }

    /// Copy with a different arc end.
    pub fn with_end(self, end: f64) -> Self {
        Self { arc: self.arc.with_end(end), ..self }
    }

    /// Copy with a different output hue.
    pub fn with_output(self, output: f64) -> Self {
        Self { output: normalize_degrees(output), ..self }
    }

    /// Remapped color, or `None` when `rgb` is outside the arc.
    #[inline]
    pub fn remap_pixel(&self, rgb: Rgb) -> Option<Rgb> {
        let hsl = rgb_to_hsl(rgb);
        self.arc
            .contains(hsl.h)
            .then(|| hsl_to_rgb(hsl.with_hue(self.output)))
    }

    /// Remapped color, or `rgb` itself when outside the arc.
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        self.remap_pixel(rgb).unwrap_or(rgb)
    }
}

/// Counters from one remap pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapStats {
    /// Pixels visited
    pub pixels: usize,
    /// Pixels whose hue was inside the arc
    pub remapped: usize,
}

impl std::ops::Add for RemapStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            pixels: self.pixels + rhs.pixels,
            remapped: self.remapped + rhs.remapped,
        }
    }
}

/// Remaps a packed RGB or RGBA buffer in place.
///
/// `channels` must be 3 or 4; a trailing partial pixel is ignored. In-arc
/// pixels are rewritten even when the conversion happens to reproduce them,
/// so `remapped` counts selection, not change.
///
/// # Errors
///
/// Returns [`Error::UnsupportedChannels`] for any other channel count.
pub fn remap_in_place(pixels: &mut [u8], channels: usize, remap: &HueRemap) -> Result<RemapStats> {
    if channels != 3 && channels != 4 {
        return Err(Error::UnsupportedChannels(channels));
    }

    Ok(sweep(pixels, channels, remap))
}

fn sweep(pixels: &mut [u8], channels: usize, remap: &HueRemap) -> RemapStats {
    let mut stats = RemapStats::default();
    for px in pixels.chunks_exact_mut(channels) {
        stats.pixels += 1;
        if let Some(out) = remap.remap_pixel(Rgb::from_slice(px)) {
            out.write_to(px);
            stats.remapped += 1;
        }
    }
    stats
}

/// Runs the remap pass on a copy of `src`.
pub fn remap(src: &RasterImage, remap: &HueRemap) -> RasterImage {
    remap_with_stats(src, remap).0
}

/// Like [`remap`], also returning the pass counters.
pub fn remap_with_stats(src: &RasterImage, remap: &HueRemap) -> (RasterImage, RemapStats) {
    let mut out = src.clone();
    let stats = sweep(out.data_mut(), crate::image::CHANNELS, remap);
    (out, stats)
}
