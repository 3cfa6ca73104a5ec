//! # hueshift-core
//!
//! Core types for hue remapping.
//!
//! This crate holds the reference implementation that every other crate in the
//! workspace builds on:
//!
//! - [`Rgb`], [`Hsl`] - 8-bit RGB and percentage HSL colors with the canonical
//!   conversion pair [`rgb_to_hsl`] / [`hsl_to_rgb`]
//! - [`HueArc`] - circular hue interval that may wrap through 0/360
//! - [`HueRemap`] - immutable remap configuration (input arc + output hue)
//! - [`remap_in_place`] / [`remap`] - the CPU remap pass
//! - [`RasterImage`] - shared RGBA8 raster buffer
//! - [`angle`] - pointer position to dial angle mapping
//! - [`palette`] - dominant color extraction
//!
//! ## Crate Structure
//!
//! ```text
//! hueshift-core (this crate)
//!    ^
//!    |
//!    +-- hueshift-io (decode/encode rasters)
//!    +-- hueshift-compute (CPU/wgpu backends, renderer)
//!    +-- hueshift-cli, hueshift-view
//! ```
//!
//! The GPU shader in `hueshift-compute` re-implements [`rgb_to_hsl`],
//! [`hsl_to_rgb`] and [`HueArc::contains`] in WGSL; the functions here are the
//! reference those shaders are tested against.
//!
//! ## Example
//!
//! ```rust
//! use hueshift_core::{HueRemap, Rgb, rgb_to_hsl};
//!
//! let blue = Rgb::new(0, 0, 255);
//! assert_eq!(rgb_to_hsl(blue).h, 240.0);
//!
//! let remap = HueRemap::new(150.0, 270.0, 60.0);
//! assert_eq!(remap.apply(blue), Rgb::new(255, 255, 0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize [`HueArc`] and [`HueRemap`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod angle;
pub mod arc;
pub mod color;
pub mod error;
pub mod image;
pub mod palette;
pub mod remap;

pub use arc::{in_range, normalize_degrees, HueArc};
pub use color::{hsl_to_rgb, rgb_to_hsl, round_half_up, Hsl, Rgb};
pub use error::{Error, Result};
pub use image::RasterImage;
pub use palette::{extract_palette, PaletteEntry, PaletteOptions};
pub use remap::{remap, remap_in_place, remap_with_stats, HueRemap, RemapStats};

/// Prelude module for convenient imports.
///
/// ```
/// use hueshift_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::angle::{pick_handle, screen_point_to_angle, Handle, Point};
    pub use crate::arc::HueArc;
    pub use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
    pub use crate::error::{Error, Result};
    pub use crate::image::RasterImage;
    pub use crate::remap::{HueRemap, RemapStats};
}
