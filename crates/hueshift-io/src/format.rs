//! Format detection from extensions and magic bytes.

use crate::IoResult;
use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// GIF format (first frame only).
    Gif,
    /// Windows bitmap.
    Bmp,
    /// TIFF format.
    Tiff,
    /// WebP format.
    WebP,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from a file, checking magic bytes first and falling
    /// back to the extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let mut header = [0u8; 12];
        let n = File::open(path)?.read(&mut header)?;

        match Self::from_bytes(&header[..n]) {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            Some("gif") => Format::Gif,
            Some("bmp") => Format::Bmp,
            Some("tif") | Some("tiff") => Format::Tiff,
            Some("webp") => Format::WebP,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the leading bytes of a file.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Format::Png;
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Format::Jpeg;
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Format::Gif;
        }
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
            return Format::Tiff;
        }
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Format::WebP;
        }
        // "BM" is short enough to collide with text; check it last
        if bytes.starts_with(b"BM") {
            return Format::Bmp;
        }
        Format::Unknown
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Format::Png => Some(ImageFormat::Png),
            Format::Jpeg => Some(ImageFormat::Jpeg),
            Format::Gif => Some(ImageFormat::Gif),
            Format::Bmp => Some(ImageFormat::Bmp),
            Format::Tiff => Some(ImageFormat::Tiff),
            Format::WebP => Some(ImageFormat::WebP),
            Format::Unknown => None,
        }
    }

    /// False for formats that cannot store an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Format::Jpeg | Format::Unknown)
    }
}
