//! CLI command implementations

pub mod backends;
pub mod hsl;
pub mod palette;
pub mod remap;
#[cfg(feature = "viewer")]
pub mod view;

use anyhow::{bail, Context, Result};
use hueshift_core::RasterImage;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<RasterImage> {
    hueshift_io::read(path)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &RasterImage) -> Result<()> {
    hueshift_io::write(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse three comma-separated numbers, e.g. "12,200,99" or "240, 100, 50".
pub fn parse_triplet(s: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("Expected three comma-separated values, got '{s}'");
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .with_context(|| format!("Invalid number '{part}' in '{s}'"))?;
        if !slot.is_finite() {
            bail!("Invalid number '{part}' in '{s}'");
        }
    }
    Ok(out)
}

/// Count pixels whose bytes differ between two images of equal size.
pub fn changed_pixels(a: &RasterImage, b: &RasterImage) -> usize {
    a.data()
        .chunks_exact(4)
        .zip(b.data().chunks_exact(4))
        .filter(|(x, y)| x != y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplets() {
        assert_eq!(parse_triplet("0,0,255").unwrap(), [0.0, 0.0, 255.0]);
        assert_eq!(parse_triplet(" 240 , 100, 50.5").unwrap(), [240.0, 100.0, 50.5]);
        assert!(parse_triplet("1,2").is_err());
        assert!(parse_triplet("1,2,3,4").is_err());
        assert!(parse_triplet("a,2,3").is_err());
        assert!(parse_triplet("inf,2,3").is_err());
    }

    #[test]
    fn changed_pixel_count() {
        let a = RasterImage::filled(2, 2, [0, 0, 255, 255]).unwrap();
        let mut b = a.clone();
        b.data_mut()[4] = 9;
        assert_eq!(changed_pixels(&a, &a), 0);
        assert_eq!(changed_pixels(&a, &b), 1);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = load_image(Path::new("/nonexistent/hueshift.png")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hueshift.png"));
    }
}
