//! Integration tests for hueshift crates.
//!
//! End-to-end tests across io, core and compute, golden hashes of the CPU
//! kernel, and GPU/CPU parity.
//!
//! The synthetic inputs in `fixtures` are shared with
//! `tests/golden/generate_golden.py` and must stay byte-identical to it.

#[cfg(test)]
mod fixtures {
    //! Deterministic test images.

    use hueshift_core::RasterImage;

    /// Seed of [`xorshift_noise`] used by the golden data.
    pub const NOISE_SEED: u32 = 0x2545_f491;

    /// 64x64: every `(r, g, b)` with channels in steps of 17, opaque.
    pub fn rgb_cube_16() -> RasterImage {
        let mut data = Vec::with_capacity(64 * 64 * 4);
        for r in 0..16u8 {
            for g in 0..16u8 {
                for b in 0..16u8 {
                    data.extend_from_slice(&[r * 17, g * 17, b * 17, 255]);
                }
            }
        }
        RasterImage::from_rgba8(64, 64, data).expect("64x64 buffer")
    }

    /// xorshift32 noise, alpha included.
    pub fn xorshift_noise(width: u32, height: u32, seed: u32) -> RasterImage {
        let mut s = seed;
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            s ^= s << 13;
            s ^= s >> 17;
            s ^= s << 5;
            data.extend_from_slice(&s.to_le_bytes());
        }
        RasterImage::from_rgba8(width, height, data).expect("noise buffer")
    }

    /// Fixture by golden-data name.
    pub fn by_name(name: &str) -> Option<RasterImage> {
        match name {
            "cube16" => Some(rgb_cube_16()),
            "noise64" => Some(xorshift_noise(64, 64, NOISE_SEED)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod golden;

#[cfg(all(test, feature = "wgpu"))]
mod gpu_parity;
