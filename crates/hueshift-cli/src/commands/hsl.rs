//! HSL command - convert a single color between RGB and HSL.

use anyhow::{bail, Result};
use hueshift_core::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
use tracing::trace;

use crate::HslArgs;

pub fn run(args: HslArgs, verbose: u8) -> Result<()> {
    trace!(color = %args.color, from_hsl = args.from_hsl, "hsl::run");
    let values = super::parse_triplet(&args.color)?;

    if args.from_hsl {
        let [h, s, l] = values;
        if !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
            bail!("Saturation and lightness must be within 0-100, got {s}, {l}");
        }
        let rgb = hsl_to_rgb(Hsl::new(h, s, l));
        println!("rgb({rgb}) {}", rgb.to_hex());
        if verbose > 0 {
            println!("round trip: {}", rgb_to_hsl(rgb));
        }
    } else {
        let rgb = parse_rgb(values)?;
        let hsl = rgb_to_hsl(rgb);
        println!("{hsl}");
        if verbose > 0 {
            println!("exact: {}", Hsl::from_rgb_exact(rgb));
        }
    }

    Ok(())
}

fn parse_rgb([r, g, b]: [f64; 3]) -> Result<Rgb> {
    let channel = |v: f64| -> Result<u8> {
        if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
            bail!("RGB channels must be integers within 0-255, got {v}");
        }
        Ok(v as u8)
    };
    Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels_validated() {
        assert_eq!(parse_rgb([0.0, 128.0, 255.0]).unwrap(), Rgb::new(0, 128, 255));
        assert!(parse_rgb([256.0, 0.0, 0.0]).is_err());
        assert!(parse_rgb([-1.0, 0.0, 0.0]).is_err());
        assert!(parse_rgb([1.5, 0.0, 0.0]).is_err());
    }
}
