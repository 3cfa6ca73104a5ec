//! Error types for hueshift-core operations.
//!
//! The color kernel itself never fails: out-of-range channel values are the
//! caller's responsibility and degenerate colors are handled as regular
//! branches. Errors only arise when building or indexing raster buffers.
//!
//! # Usage
//!
//! ```rust
//! use hueshift_core::{Error, RasterImage};
//!
//! let err = RasterImage::from_rgba8(2, 2, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::BufferSizeMismatch { expected: 16, actual: 3 }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing raster images.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the buffer size would
    /// overflow `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Raw buffer length does not match `width * height * channels`.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Channel count is not one the remap pass can walk (3 or 4).
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
}
