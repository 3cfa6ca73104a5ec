//! Shared RGBA8 raster buffer.
//!
//! Pixels are stored row-major, top to bottom, four bytes per pixel:
//!
//! ```text
//! [R G B A R G B A ...]  <- row 0
//! [R G B A R G B A ...]  <- row 1
//! ```
//!
//! The buffer lives in an [`Arc<Vec<u8>>`], so clones are cheap and a decoded
//! source can be handed to every remap pass without copying. Mutation goes
//! through [`RasterImage::data_mut`], which clones on write when shared.

use crate::{Error, Result, Rgb};
use std::sync::Arc;

/// Width x height RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

fn byte_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions {
            width,
            height,
            reason: "width and height must be non-zero".into(),
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| Error::InvalidDimensions {
            width,
            height,
            reason: "buffer size overflows usize".into(),
        })
}

impl RasterImage {
    /// Creates an opaque black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero or overflowing size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 255])
    }

    /// Creates an image with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = byte_len(width, height, CHANNELS)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Wraps an existing RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] when `data.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, CHANNELS)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Converts a packed RGB8 buffer, setting alpha to 255.
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = byte_len(width, height, 3)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let rgba = data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect();
        Ok(Self {
            data: Arc::new(rgba),
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable bytes, cloning the buffer first if it is shared.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the image and returns its bytes, copying only if shared.
    pub fn into_raw(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// True when both images point at the same buffer.
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let off = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[off..off + CHANNELS]);
        Ok(px)
    }

    /// RGB part of the pixel at `(x, y)`.
    pub fn rgb(&self, x: u32, y: u32) -> Result<Rgb> {
        self.pixel(x, y).map(|px| Rgb::from_slice(&px))
    }

    /// Iterates over the RGB part of every pixel.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data.chunks_exact(CHANNELS).map(Rgb::from_slice)
    }
}
