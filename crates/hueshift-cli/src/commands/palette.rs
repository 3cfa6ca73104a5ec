//! Palette command - list dominant saturated colors.

use anyhow::Result;
use hueshift_core::{extract_palette, PaletteEntry, PaletteOptions};
use tracing::{info, trace};

use crate::PaletteArgs;

pub fn run(args: PaletteArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "palette::run");

    let opts = options(&args);
    let entries = collect(&args)?;

    let shown = args.limit.unwrap_or(entries.len()).min(entries.len());
    if verbose > 0 {
        println!(
            "{}: {} colors (count > {}, s > {}%, l < {}%), showing {}",
            args.input.display(),
            entries.len(),
            opts.min_count,
            opts.min_saturation,
            opts.max_lightness,
            shown
        );
    }

    for entry in &entries[..shown] {
        println!(
            "{}  {:<13} {:<24} {:>8}",
            entry.rgb.to_hex(),
            format!("rgb({})", entry.rgb),
            entry.hsl.to_string(),
            entry.count
        );
    }

    Ok(())
}

fn options(args: &PaletteArgs) -> PaletteOptions {
    PaletteOptions {
        min_count: args.min_count,
        min_saturation: args.min_saturation,
        max_lightness: args.max_lightness,
    }
}

/// Loads the input and extracts its palette, most frequent first.
fn collect(args: &PaletteArgs) -> Result<Vec<PaletteEntry>> {
    let image = super::load_image(&args.input)?;
    let entries = extract_palette(&image, &options(args));
    info!(colors = entries.len(), "palette extracted");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_core::{RasterImage, Rgb};
    use std::path::Path;

    fn palette_args(input: &Path) -> PaletteArgs {
        PaletteArgs {
            input: input.to_path_buf(),
            min_count: 500,
            min_saturation: 10.0,
            max_lightness: 90.0,
            limit: None,
        }
    }

    /// 32x32: 600 blue, 300 red, 124 gray pixels.
    fn write_fixture(path: &Path) {
        let mut data = Vec::with_capacity(32 * 32 * 4);
        for i in 0..32 * 32 {
            let px = match i {
                0..=599 => [0, 0, 255, 255],
                600..=899 => [255, 0, 0, 255],
                _ => [128, 128, 128, 255],
            };
            data.extend_from_slice(&px);
        }
        let image = RasterImage::from_rgba8(32, 32, data).unwrap();
        hueshift_io::write(path, &image).unwrap();
    }

    #[test]
    fn collects_frequent_saturated_colors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("palette.png");
        write_fixture(&input);

        let entries = collect(&palette_args(&input)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rgb, Rgb::new(0, 0, 255));
        assert_eq!(entries[0].count, 600);

        let mut loose = palette_args(&input);
        loose.min_count = 100;
        let entries = collect(&loose).unwrap();
        let colors: Vec<Rgb> = entries.iter().map(|e| e.rgb).collect();
        assert_eq!(colors, vec![Rgb::new(0, 0, 255), Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn run_honors_limit() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("palette.png");
        write_fixture(&input);

        let mut args = palette_args(&input);
        args.min_count = 0;
        args.limit = Some(1);
        run(args, 1).unwrap();
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"not a png").unwrap();
        assert!(collect(&palette_args(&input)).is_err());
    }
}
