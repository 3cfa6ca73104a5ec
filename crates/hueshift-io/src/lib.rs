//! # hueshift-io
//!
//! Raster image reading and writing for hueshift.
//!
//! Everything decodes to a [`RasterImage`] (RGBA8) regardless of the source
//! layout: grayscale, palette and 16-bit inputs are converted on load. The
//! decoders come from the `image` crate:
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG | Yes | Yes | alpha kept |
//! | JPEG | Yes | Yes | alpha dropped on write |
//! | GIF | Yes | Yes | first frame |
//! | BMP | Yes | Yes | |
//! | TIFF | Yes | Yes | |
//! | WebP | Yes | Yes | lossless encoder |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hueshift_io::{read, write};
//!
//! let image = read("input.jpg")?;
//! write("output.png", &image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod format;

pub use error::{IoError, IoResult};
pub use format::Format;

use hueshift_core::RasterImage;
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::debug;

fn decode_error(err: ImageError) -> IoError {
    match err {
        ImageError::IoError(e) => IoError::Io(e),
        ImageError::Unsupported(u) => IoError::UnsupportedFormat(u.to_string()),
        other => IoError::Decode(other.to_string()),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

fn into_raster(img: DynamicImage) -> IoResult<RasterImage> {
    let (width, height) = (img.width(), img.height());
    let rgba = img.into_rgba8().into_raw();
    Ok(RasterImage::from_rgba8(width, height, rgba)?)
}

/// Reads an image from a file, detecting the format from magic bytes.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the format is not
/// supported or the data is corrupt.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RasterImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    let image_format = format.image_format().ok_or_else(|| unsupported(path))?;

    let reader = BufReader::new(File::open(path)?);
    let img = ImageReader::with_format(reader, image_format)
        .decode()
        .map_err(decode_error)?;
    debug!(path = %path.display(), ?format, width = img.width(), height = img.height(), "decoded");

    into_raster(img)
}

/// Decodes an in-memory encoded image.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<RasterImage> {
    let format = Format::from_bytes(bytes);
    let image_format = format
        .image_format()
        .ok_or_else(|| IoError::UnsupportedFormat("unrecognized header".into()))?;

    let img = ImageReader::with_format(Cursor::new(bytes), image_format)
        .decode()
        .map_err(decode_error)?;
    debug!(?format, bytes = bytes.len(), "decoded from memory");

    into_raster(img)
}

fn encode<W: Write + Seek>(w: &mut W, image: &RasterImage, format: Format) -> IoResult<()> {
    let image_format = format
        .image_format()
        .ok_or_else(|| IoError::UnsupportedFormat(format!("{format:?}")))?;

    let buf = RgbaImage::from_raw(image.width(), image.height(), image.data().to_vec())
        .ok_or_else(|| IoError::Encode("pixel buffer does not match dimensions".into()))?;
    let mut dynamic = DynamicImage::ImageRgba8(buf);
    if !format.supports_alpha() {
        dynamic = DynamicImage::ImageRgb8(dynamic.to_rgb8());
    }

    dynamic
        .write_to(w, image_format)
        .map_err(|e| IoError::Encode(e.to_string()))
}

/// Writes an image, picking the format from the file extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown extensions, or an I/O
/// or encode error.
pub fn write<P: AsRef<Path>>(path: P, image: &RasterImage) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    if format == Format::Unknown {
        return Err(unsupported(path));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    encode(&mut writer, image, format)?;
    writer.flush()?;
    debug!(path = %path.display(), ?format, "encoded");
    Ok(())
}

/// Encodes an image into memory.
pub fn write_to_memory(image: &RasterImage, format: Format) -> IoResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    encode(&mut cursor, image, format)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 200, (x * 8 + 100) as u8]);
            }
        }
        RasterImage::from_rgba8(width, height, data).unwrap()
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = gradient(8, 5);

        write(&path, &img).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn jpeg_drops_alpha() {
        let img = gradient(8, 8);
        let bytes = write_to_memory(&img, Format::Jpeg).unwrap();
        let back = read_from_memory(&bytes).unwrap();
        assert_eq!(back.dimensions(), (8, 8));
        assert!(back.data().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write(dir.path().join("out.exr"), &gradient(2, 2)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "exr"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read("/nonexistent/hueshift/in.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(matches!(
            read_from_memory(b"not an image at all"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
