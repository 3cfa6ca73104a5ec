//! Error types for image I/O.

use std::io;
use thiserror::Error;

/// Image I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be opened, read or created.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Extension or magic bytes name no supported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File contents could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoder rejected the image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Decoded pixels do not form a valid raster.
    #[error(transparent)]
    Image(#[from] hueshift_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
