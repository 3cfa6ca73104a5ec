//! Remap command - shift a hue arc to one output hue.

use anyhow::{Context, Result};
use hueshift_compute::Processor;
use hueshift_core::HueRemap;
use tracing::{debug, info, trace};

use crate::RemapArgs;

pub fn run(args: RemapArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "remap::run");

    let image = super::load_image(&args.input)?;
    let (width, height) = image.dimensions();
    debug!(width, height, "loaded input");

    let remap = HueRemap::new(args.start, args.end, args.to);
    let processor = Processor::new(args.backend.into())
        .with_context(|| format!("Failed to initialize {:?} backend", args.backend))?;

    info!(
        backend = processor.backend_name(),
        start = remap.arc.start,
        end = remap.arc.end,
        output = remap.output,
        "remapping hues"
    );

    let out = processor
        .remap(&image, &remap)
        .context("Hue remap failed")?;
    super::save_image(&args.output, &out)?;

    if verbose > 0 {
        let changed = super::changed_pixels(&image, &out);
        println!(
            "{} -> {} ({}x{}, {} backend): {}",
            args.input.display(),
            args.output.display(),
            width,
            height,
            processor.backend_name(),
            summary(changed, image.pixel_count(), &remap),
        );
    }

    Ok(())
}

/// Byte-level change count. Pixels inside the arc that convert back to the
/// same bytes are not counted.
fn summary(changed: usize, total: usize, remap: &HueRemap) -> String {
    format!(
        "{changed} of {total} pixels changed, arc {}..{} -> {}",
        remap.arc.start, remap.arc.end, remap.output
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendArg;
    use hueshift_core::RasterImage;
    use std::path::Path;

    fn remap_args(input: &Path, output: &Path, start: f64, end: f64, to: f64) -> RemapArgs {
        RemapArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            start,
            end,
            to,
            backend: BackendArg::Cpu,
        }
    }

    #[test]
    fn remaps_png_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        // blue, then red
        let src = RasterImage::from_rgba8(2, 1, vec![0, 0, 255, 255, 255, 0, 0, 128]).unwrap();
        hueshift_io::write(&input, &src).unwrap();

        run(remap_args(&input, &output, 150.0, 270.0, 60.0), 1).unwrap();

        let out = hueshift_io::read(&output).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap(), [255, 255, 0, 255]);
        assert_eq!(out.pixel(1, 0).unwrap(), [255, 0, 0, 128]);
        assert_eq!(src.pixel(0, 0).unwrap(), [0, 0, 255, 255]);
    }

    #[test]
    fn wrapping_arc_from_cli() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        // red sits on the wrapping arc 330..30, green does not
        let src = RasterImage::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        hueshift_io::write(&input, &src).unwrap();

        run(remap_args(&input, &output, 330.0, 30.0, 240.0), 0).unwrap();

        let out = hueshift_io::read(&output).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap(), [0, 0, 255, 255]);
        assert_eq!(out.pixel(1, 0).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn missing_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let err = run(remap_args(&dir.path().join("nope.png"), &output, 150.0, 270.0, 60.0), 0).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
        assert!(!output.exists());
    }

    #[test]
    fn summary_reports_byte_changes() {
        // blue mapped onto its own hue keeps its bytes
        let src = RasterImage::filled(1, 1, [0, 0, 255, 255]).unwrap();
        let remap = HueRemap::new(150.0, 270.0, 240.0);
        let out = hueshift_core::remap(&src, &remap);
        let line = summary(crate::commands::changed_pixels(&src, &out), src.pixel_count(), &remap);
        assert_eq!(line, "0 of 1 pixels changed, arc 150..270 -> 240");
    }
}
