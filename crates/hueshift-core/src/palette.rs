//! Dominant color extraction.
//!
//! Counts every distinct RGB triple in an image and keeps the frequent,
//! reasonably saturated, not-too-light ones. The viewer plots the result on
//! the input dial so users can see which hues an image actually contains.

use crate::{rgb_to_hsl, Hsl, RasterImage, Rgb};
use std::collections::HashMap;

/// Filter thresholds for [`extract_palette`]. All bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteOptions {
    /// Keep colors seen more than this many times
    pub min_count: usize,
    /// Keep colors with saturation above this percentage
    pub min_saturation: f64,
    /// Keep colors with lightness below this percentage
    pub max_lightness: f64,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            min_count: 500,
            min_saturation: 10.0,
            max_lightness: 90.0,
        }
    }
}

/// One retained color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    /// The color
    pub rgb: Rgb,
    /// Its rounded HSL form
    pub hsl: Hsl,
    /// Number of pixels with exactly this color
    pub count: usize,
}

/// Frequent saturated colors of `image`, most common first.
///
/// Equal counts are ordered by RGB value so the result is deterministic.
pub fn extract_palette(image: &RasterImage, opts: &PaletteOptions) -> Vec<PaletteEntry> {
    let mut counts: HashMap<Rgb, usize> = HashMap::new();
    for rgb in image.rgb_pixels() {
        *counts.entry(rgb).or_default() += 1;
    }

    let mut entries: Vec<PaletteEntry> = counts
        .into_iter()
        .filter(|&(_, count)| count > opts.min_count)
        .map(|(rgb, count)| PaletteEntry {
            rgb,
            hsl: rgb_to_hsl(rgb),
            count,
        })
        .filter(|e| e.hsl.s > opts.min_saturation && e.hsl.l < opts.max_lightness)
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.rgb.cmp(&b.rgb)));
    entries
}
